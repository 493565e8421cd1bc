//! File Warranty Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use shopfront::warranty::{WarrantyInput, lenient_months};
use uuid::Uuid;

use shopfront_app::domain::warranties::data::NewWarranty;

use crate::{
    extensions::*,
    observability::record_warranty_filed,
    state::State,
    warranties::{errors::into_status_error, get::WarrantyResponse},
    warranty_fields::{WarrantyDetailsBody, parse_start},
};

/// File Warranty Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FileWarrantyRequest {
    pub uuid: Uuid,

    /// Sale the warranty covers; its product name is used when none is given
    #[serde(default)]
    pub sale_uuid: Option<Uuid>,

    /// Staff member filing the warranty
    pub staff_uuid: Uuid,

    #[serde(default)]
    pub product_name: Option<String>,

    /// ISO date or date-time; defaults to today
    #[serde(default)]
    pub warranty_start: Option<String>,

    /// Duration in months; non-numeric values count as zero
    #[serde(default, deserialize_with = "lenient_months")]
    pub warranty_months: Option<i64>,

    #[serde(default)]
    pub warranty_details: WarrantyDetailsBody,
}

impl TryFrom<FileWarrantyRequest> for NewWarranty {
    type Error = StatusError;

    fn try_from(request: FileWarrantyRequest) -> Result<Self, Self::Error> {
        Ok(NewWarranty {
            uuid: request.uuid.into(),
            sale_uuid: request.sale_uuid.map(Into::into),
            staff_uuid: request.staff_uuid.into(),
            product_name: request.product_name,
            warranty_details: request.warranty_details.try_into()?,
            input: WarrantyInput {
                warranty_start: parse_start(request.warranty_start.as_deref())?,
                warranty_months: request.warranty_months,
            },
        })
    }
}

/// File Warranty Handler
///
/// Computes warranty terms, stores them and emails the customer.
#[endpoint(
    tags("warranties"),
    summary = "File Warranty",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Warranty filed"),
        (status_code = StatusCode::CONFLICT, description = "Warranty already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Unknown sale or staff member, or invalid date"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "warranties.create",
    skip(json, depot, res),
    fields(
        tenant_uuid = tracing::field::Empty,
        warranty_uuid = tracing::field::Empty,
        staff_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<FileWarrantyRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WarrantyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("warranty_uuid", tracing::field::display(request.uuid));
    span.record("staff_uuid", tracing::field::display(request.staff_uuid));

    let warranty = state
        .app
        .warranties
        .file_warranty(tenant, request.try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/warranties/{}", warranty.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    record_warranty_filed();

    Ok(Json(warranty.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::{
        sales::records::SaleUuid,
        staff::records::StaffUuid,
        warranties::{MockWarrantiesService, WarrantiesServiceError, records::WarrantyUuid},
    };

    use crate::test_helpers::{TEST_TENANT_UUID, make_warranty, warranties_service};

    use super::*;

    fn make_service(repo: MockWarrantiesService) -> Service {
        warranties_service(repo, Router::with_path("warranties").post(handler))
    }

    #[tokio::test]
    async fn test_file_warranty_returns_201() -> TestResult {
        let uuid = WarrantyUuid::new();
        let staff = StaffUuid::new();
        let warranty = make_warranty(uuid);

        let mut repo = MockWarrantiesService::new();

        repo.expect_file_warranty()
            .once()
            .withf(move |tenant, new| {
                *tenant == TEST_TENANT_UUID
                    && new.uuid == uuid
                    && new.staff_uuid == staff
                    && new.sale_uuid.is_none()
                    && new.product_name.as_deref() == Some("Pixel 9")
                    && new.input == WarrantyInput::new(date(2025, 1, 1), 12)
            })
            .return_once(move |_, _| Ok(warranty));

        let mut res = TestClient::post("http://example.com/warranties")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "staff_uuid": staff.into_uuid(),
                "product_name": "Pixel 9",
                "warranty_start": "2025-01-01",
                "warranty_months": "12",
                "warranty_details": { "customer_email": "ada@example.com" },
            }))
            .send(&make_service(repo))
            .await;

        let body: WarrantyResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/warranties/{uuid}").as_str()));
        assert_eq!(body.warranty_end.as_deref(), Some("2026-01-01"));

        Ok(())
    }

    #[tokio::test]
    async fn test_file_warranty_without_fields_leaves_terms_to_service() -> TestResult {
        let uuid = WarrantyUuid::new();
        let sale = SaleUuid::new();
        let warranty = make_warranty(uuid);

        let mut repo = MockWarrantiesService::new();

        repo.expect_file_warranty()
            .once()
            .withf(move |_, new| {
                new.sale_uuid == Some(sale)
                    && new.product_name.is_none()
                    && new.input == WarrantyInput::default()
            })
            .return_once(move |_, _| Ok(warranty));

        let res = TestClient::post("http://example.com/warranties")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "sale_uuid": sale.into_uuid(),
                "staff_uuid": StaffUuid::new().into_uuid(),
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_file_warranty_unknown_staff_returns_422() -> TestResult {
        let mut repo = MockWarrantiesService::new();

        repo.expect_file_warranty()
            .once()
            .return_once(|_, _| Err(WarrantiesServiceError::StaffNotFound));

        let res = TestClient::post("http://example.com/warranties")
            .json(&json!({
                "uuid": WarrantyUuid::new().into_uuid(),
                "staff_uuid": StaffUuid::new().into_uuid(),
                "product_name": "Pixel 9",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_file_warranty_unparseable_start_returns_422() -> TestResult {
        let mut repo = MockWarrantiesService::new();

        repo.expect_file_warranty().never();

        let res = TestClient::post("http://example.com/warranties")
            .json(&json!({
                "uuid": WarrantyUuid::new().into_uuid(),
                "staff_uuid": StaffUuid::new().into_uuid(),
                "product_name": "Pixel 9",
                "warranty_start": "2025-13-45",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
