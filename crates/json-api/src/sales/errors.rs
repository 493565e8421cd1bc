//! Sale Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::sales::SalesServiceError;

pub(crate) fn into_status_error(error: SalesServiceError) -> StatusError {
    match error {
        SalesServiceError::AlreadyExists => StatusError::conflict().brief("Sale already exists"),
        SalesServiceError::NotFound => StatusError::not_found().brief("Sale not found"),
        SalesServiceError::MissingRequiredData | SalesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid sale payload")
        }
        SalesServiceError::InvalidReference => {
            StatusError::unprocessable_entity().brief("Sale refers to an unknown resource")
        }
        SalesServiceError::ProductNotFound => {
            StatusError::unprocessable_entity().brief("Product not found")
        }
        SalesServiceError::StaffNotFound => {
            StatusError::unprocessable_entity().brief("Staff member not found")
        }
        SalesServiceError::InvalidQuantity => {
            StatusError::unprocessable_entity().brief("Quantity must be at least 1")
        }
        error @ SalesServiceError::InsufficientStock { .. } => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        SalesServiceError::InvalidDateRange => {
            StatusError::unprocessable_entity().brief("\"from\" must not be after \"to\"")
        }
        SalesServiceError::WarrantyOutOfRange => {
            StatusError::unprocessable_entity().brief("Warranty dates are out of range")
        }
        SalesServiceError::TotalOutOfRange | SalesServiceError::OutOfRange(_) => {
            StatusError::unprocessable_entity().brief("Quantity or total is out of range")
        }
        SalesServiceError::Sql(source) => {
            error!("sale storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
