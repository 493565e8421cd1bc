//! Staff service errors.

use std::num::TryFromIntError;

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum StaffServiceError {
    #[error("staff member already exists")]
    AlreadyExists,

    #[error("staff member not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("commission rate must be between 0 and 10000 basis points")]
    InvalidCommissionRate,

    #[error("sales target out of range")]
    OutOfRange(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StaffServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Failure::Missing => Self::NotFound,
            Failure::Duplicate => Self::AlreadyExists,
            Failure::DanglingReference => Self::InvalidReference,
            Failure::MissingValue => Self::MissingRequiredData,
            Failure::Rejected | Failure::OutOfRange => Self::InvalidData,
            Failure::Storage => Self::Sql(error),
        }
    }
}
