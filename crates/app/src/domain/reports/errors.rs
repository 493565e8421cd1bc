//! Reports service errors.

use std::num::TryFromIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("`from` is after `to`")]
    InvalidDateRange,

    #[error("report figure out of range")]
    OutOfRange(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
