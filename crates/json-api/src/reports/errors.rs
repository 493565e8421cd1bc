//! Report Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::reports::ReportsServiceError;

pub(crate) fn into_status_error(error: ReportsServiceError) -> StatusError {
    match error {
        ReportsServiceError::InvalidDateRange => {
            StatusError::unprocessable_entity().brief("\"from\" must not be after \"to\"")
        }
        ReportsServiceError::OutOfRange(source) => {
            error!("report figure out of range: {source}");

            StatusError::internal_server_error()
        }
        ReportsServiceError::Sql(source) => {
            error!("report storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
