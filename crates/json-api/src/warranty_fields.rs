//! Warranty request and response fields shared by sales and filed warranties.

use jiff::civil::Date;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use shopfront::warranty::{WarrantyDetails, WarrantyTerms, parse_email, parse_warranty_start};

use crate::extensions::*;

/// Customer and device details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct WarrantyDetailsBody {
    /// Customer full name
    pub customer_name: Option<String>,

    /// Address the warranty confirmation is sent to
    pub customer_email: Option<String>,

    /// Customer contact number
    pub customer_phone: Option<String>,

    /// Device IMEI
    pub imei: Option<String>,

    /// Device colour
    pub color: Option<String>,

    /// Device storage capacity
    pub storage: Option<String>,
}

impl TryFrom<WarrantyDetailsBody> for WarrantyDetails {
    type Error = StatusError;

    /// Rejects a non-blank `customer_email` that is not a single address with 422.
    fn try_from(body: WarrantyDetailsBody) -> Result<Self, Self::Error> {
        let customer_email = match body.customer_email {
            Some(email) if !email.trim().is_empty() => Some(
                parse_email(&email)
                    .or_422("invalid customer_email")?
                    .to_string(),
            ),
            email => email,
        };

        Ok(WarrantyDetails {
            customer_name: body.customer_name,
            customer_email,
            customer_phone: body.customer_phone,
            imei: body.imei,
            color: body.color,
            storage: body.storage,
        })
    }
}

impl From<WarrantyDetails> for WarrantyDetailsBody {
    fn from(details: WarrantyDetails) -> Self {
        WarrantyDetailsBody {
            customer_name: details.customer_name,
            customer_email: details.customer_email,
            customer_phone: details.customer_phone,
            imei: details.imei,
            color: details.color,
            storage: details.storage,
        }
    }
}

/// Warranty start, end and status as they appear on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TermsFields {
    pub warranty_start: Option<String>,
    pub warranty_end: Option<String>,
    pub warranty_status: Option<String>,
}

impl From<Option<&WarrantyTerms>> for TermsFields {
    fn from(terms: Option<&WarrantyTerms>) -> Self {
        let Some(terms) = terms else {
            return TermsFields::default();
        };

        TermsFields {
            warranty_start: Some(terms.warranty_start.to_string()),
            warranty_end: terms.warranty_end.as_ref().map(Date::to_string),
            warranty_status: Some(terms.warranty_status.to_string()),
        }
    }
}

/// Parse an optional `warranty_start`, rejecting unrecognisable dates with 422.
pub(crate) fn parse_start(value: Option<&str>) -> Result<Option<Date>, StatusError> {
    value
        .map(parse_warranty_start)
        .transpose()
        .or_422("invalid warranty_start")
}

/// Parse an optional ISO calendar date, rejecting anything else with 422.
pub(crate) fn parse_date(field: &str, value: Option<&str>) -> Result<Option<Date>, StatusError> {
    value
        .map(|value| value.trim().parse::<Date>())
        .transpose()
        .or_422(&format!("invalid {field}"))
}
