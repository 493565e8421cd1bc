//! Staff Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::staff::StaffServiceError;

pub(crate) fn into_status_error(error: StaffServiceError) -> StatusError {
    match error {
        StaffServiceError::AlreadyExists => {
            StatusError::conflict().brief("Staff member or email already exists")
        }
        StaffServiceError::NotFound => StatusError::not_found().brief("Staff member not found"),
        StaffServiceError::InvalidReference
        | StaffServiceError::MissingRequiredData
        | StaffServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid staff payload")
        }
        StaffServiceError::InvalidCommissionRate => StatusError::unprocessable_entity()
            .brief("commission_rate_bps must be between 0 and 10000"),
        StaffServiceError::OutOfRange(_) => {
            StatusError::unprocessable_entity().brief("sales_target is out of range")
        }
        StaffServiceError::Sql(source) => {
            error!("staff storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
