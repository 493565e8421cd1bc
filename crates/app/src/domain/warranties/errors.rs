//! Warranties service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum WarrantiesServiceError {
    #[error("warranty already exists")]
    AlreadyExists,

    #[error("warranty not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("sale not found")]
    SaleNotFound,

    #[error("staff member not found")]
    StaffNotFound,

    #[error("warranty dates out of storable range")]
    WarrantyOutOfRange,
}

impl From<Error> for WarrantiesServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Failure::Missing => Self::NotFound,
            Failure::Duplicate => Self::AlreadyExists,
            Failure::DanglingReference => Self::InvalidReference,
            Failure::MissingValue => Self::MissingRequiredData,
            Failure::Rejected => Self::InvalidData,
            Failure::OutOfRange => Self::WarrantyOutOfRange,
            Failure::Storage => Self::Sql(error),
        }
    }
}
