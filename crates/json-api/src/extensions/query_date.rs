//! Date query parameter parsing helpers.

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait QueryDateExt {
    type Output;

    /// Parse the parameter as an ISO calendar date, rejecting anything else with 422.
    fn into_date(self, name: &str) -> Result<Self::Output, StatusError>;
}

impl QueryDateExt for QueryParam<String, false> {
    type Output = Option<Date>;

    fn into_date(self, name: &str) -> Result<Option<Date>, StatusError> {
        self.into_inner()
            .map(|value| value.trim().parse::<Date>())
            .transpose()
            .or_422(&format!("could not parse \"{name}\" query parameter"))
    }
}

impl QueryDateExt for QueryParam<String, true> {
    type Output = Date;

    fn into_date(self, name: &str) -> Result<Date, StatusError> {
        self.into_inner()
            .trim()
            .parse::<Date>()
            .or_422(&format!("could not parse \"{name}\" query parameter"))
    }
}
