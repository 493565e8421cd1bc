//! Warranty Errors

use salvo::http::StatusError;
use tracing::error;

use shopfront_app::domain::warranties::WarrantiesServiceError;

pub(crate) fn into_status_error(error: WarrantiesServiceError) -> StatusError {
    match error {
        WarrantiesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Warranty already exists")
        }
        WarrantiesServiceError::NotFound => StatusError::not_found().brief("Warranty not found"),
        WarrantiesServiceError::MissingRequiredData | WarrantiesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid warranty payload")
        }
        WarrantiesServiceError::InvalidReference => {
            StatusError::unprocessable_entity().brief("Warranty refers to an unknown resource")
        }
        WarrantiesServiceError::SaleNotFound => {
            StatusError::unprocessable_entity().brief("Sale not found")
        }
        WarrantiesServiceError::StaffNotFound => {
            StatusError::unprocessable_entity().brief("Staff member not found")
        }
        WarrantiesServiceError::WarrantyOutOfRange => {
            StatusError::unprocessable_entity().brief("Warranty dates are out of range")
        }
        WarrantiesServiceError::Sql(source) => {
            error!("warranty storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use crate::test_helpers::sqlx_pool_timeout;

    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (WarrantiesServiceError::AlreadyExists, StatusCode::CONFLICT),
            (WarrantiesServiceError::NotFound, StatusCode::NOT_FOUND),
            (WarrantiesServiceError::MissingRequiredData, StatusCode::BAD_REQUEST),
            (WarrantiesServiceError::SaleNotFound, StatusCode::UNPROCESSABLE_ENTITY),
            (WarrantiesServiceError::StaffNotFound, StatusCode::UNPROCESSABLE_ENTITY),
            (
                WarrantiesServiceError::WarrantyOutOfRange,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                WarrantiesServiceError::Sql(sqlx_pool_timeout()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }
}
