//! Tenants service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum TenantsServiceError {
    #[error("tenant already exists")]
    AlreadyExists,

    #[error("tenant name is required")]
    MissingName,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TenantsServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Failure::Duplicate => Self::AlreadyExists,
            Failure::MissingValue => Self::MissingName,
            Failure::Rejected | Failure::OutOfRange => Self::InvalidData,
            Failure::Missing | Failure::DanglingReference | Failure::Storage => Self::Sql(error),
        }
    }
}
