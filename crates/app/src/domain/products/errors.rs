//! Products service errors.

use std::num::TryFromIntError;

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("price or stock out of range")]
    OutOfRange(#[from] TryFromIntError),
}

impl From<Error> for ProductsServiceError {
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
