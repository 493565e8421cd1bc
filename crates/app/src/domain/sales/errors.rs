//! Sales service errors.

use std::num::TryFromIntError;

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum SalesServiceError {
    #[error("sale already exists")]
    AlreadyExists,

    #[error("sale not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: u32, requested: u32 },

    #[error("product not found")]
    ProductNotFound,

    #[error("staff member not found")]
    StaffNotFound,

    #[error("`from` is after `to`")]
    InvalidDateRange,

    #[error("warranty dates out of storable range")]
    WarrantyOutOfRange,

    #[error("sale total out of range")]
    TotalOutOfRange,

    #[error("quantity out of range")]
    OutOfRange(#[from] TryFromIntError),
}

impl From<Error> for SalesServiceError {
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
