//! Warranty Terms

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Warranty status at the time the terms were computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarrantyStatus {
    /// The warranty end date has not passed yet.
    Active,

    /// The warranty end date is in the past.
    Expired,

    /// The warranty has no fixed end date.
    Unknown,
}

impl WarrantyStatus {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown warranty status: {0}")]
pub struct UnknownWarrantyStatus(pub String);

impl FromStr for WarrantyStatus {
    type Err = UnknownWarrantyStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "unknown" => Ok(Self::Unknown),
            other => Err(UnknownWarrantyStatus(other.to_string())),
        }
    }
}

/// Computed warranty start, end and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyTerms {
    /// First day covered by the warranty.
    pub warranty_start: Date,

    /// Last day covered by the warranty, when the duration is known.
    pub warranty_end: Option<Date>,

    /// Status relative to the day the terms were computed.
    pub warranty_status: WarrantyStatus,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_round_trips_through_storage_strings() -> TestResult {
        for status in [
            WarrantyStatus::Active,
            WarrantyStatus::Expired,
            WarrantyStatus::Unknown,
        ] {
            assert_eq!(status.as_str().parse::<WarrantyStatus>()?, status);
        }

        Ok(())
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        let result = "void".parse::<WarrantyStatus>();

        assert_eq!(result, Err(UnknownWarrantyStatus("void".to_string())));
    }

    #[test]
    fn status_serializes_lowercase() -> TestResult {
        assert_eq!(
            serde_json::to_string(&WarrantyStatus::Expired)?,
            "\"expired\""
        );

        Ok(())
    }
}
