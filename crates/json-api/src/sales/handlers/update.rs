//! Update Sale Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use shopfront::warranty::{WarrantyDetails, WarrantyRequest, lenient_months};
use uuid::Uuid;

use shopfront_app::domain::sales::data::SaleUpdate;

use crate::{
    extensions::*,
    sales::{errors::into_status_error, get::SaleResponse},
    state::State,
    warranty_fields::{WarrantyDetailsBody, parse_date, parse_start},
};

/// Update Sale Request
///
/// Absent fields keep their stored value. `has_warranty: false` clears the warranty even when a
/// duration is also supplied.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateSaleRequest {
    #[serde(default)]
    pub quantity: Option<u32>,

    #[serde(default)]
    pub sold_at: Option<String>,

    #[serde(default)]
    pub has_warranty: Option<bool>,

    #[serde(default)]
    pub warranty_start: Option<String>,

    #[serde(default, deserialize_with = "lenient_months")]
    pub warranty_months: Option<i64>,

    #[serde(default)]
    pub warranty_details: Option<WarrantyDetailsBody>,
}

impl TryFrom<UpdateSaleRequest> for SaleUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateSaleRequest) -> Result<Self, Self::Error> {
        Ok(SaleUpdate {
            quantity: request.quantity,
            sold_at: parse_date("sold_at", request.sold_at.as_deref())?,
            warranty: WarrantyRequest {
                has_warranty: request.has_warranty,
                warranty_start: parse_start(request.warranty_start.as_deref())?,
                warranty_months: request.warranty_months,
            },
            warranty_details: request
                .warranty_details
                .map(WarrantyDetails::try_from)
                .transpose()?,
        })
    }
}

/// Update Sale Handler
#[endpoint(
    tags("sales"),
    summary = "Update Sale",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sale updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Sale not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid quantity, stock or date"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "sales.update",
    skip(sale, json, depot),
    fields(
        tenant_uuid = tracing::field::Empty,
        sale_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    sale: PathParam<Uuid>,
    json: JsonBody<UpdateSaleRequest>,
    depot: &mut Depot,
) -> Result<Json<SaleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let sale = sale.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("sale_uuid", tracing::field::display(sale));

    let updated = state
        .app
        .sales
        .update_sale(tenant, sale.into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        sale_uuid = %sale,
        has_warranty = updated.has_warranty(),
        "updated sale"
    );

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::sales::{
        MockSalesService, SalesServiceError,
        records::{SaleRecord, SaleUuid},
    };

    use crate::test_helpers::{TEST_TENANT_UUID, make_warranted_sale, sales_service};

    use super::*;

    fn make_service(repo: MockSalesService) -> Service {
        sales_service(repo, Router::with_path("sales/{sale}").put(handler))
    }

    fn apply(current: &SaleRecord, update: &SaleUpdate) -> SaleRecord {
        let outcome = update
            .warranty
            .on_update(current.warranty.as_ref(), date(2025, 6, 1));

        SaleRecord {
            warranty: outcome.warranty,
            ..current.clone()
        }
    }

    #[tokio::test]
    async fn test_disabling_warranty_clears_terms_even_with_months() -> TestResult {
        let uuid = SaleUuid::new();
        let current = make_warranted_sale(uuid);

        let mut repo = MockSalesService::new();

        repo.expect_update_sale()
            .once()
            .withf(move |tenant, s, update| {
                *tenant == TEST_TENANT_UUID
                    && *s == uuid
                    && update.warranty.has_warranty == Some(false)
                    && update.warranty.warranty_months == Some(24)
            })
            .return_once(move |_, _, update| Ok(apply(&current, &update)));

        let mut res = TestClient::put(format!("http://example.com/sales/{uuid}"))
            .json(&json!({ "has_warranty": false, "warranty_months": 24 }))
            .send(&make_service(repo))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["has_warranty"], false);
        assert!(body["warranty_start"].is_null());
        assert!(body["warranty_end"].is_null());
        assert!(body["warranty_status"].is_null());

        Ok(())
    }

    #[tokio::test]
    async fn test_new_duration_recomputes_terms() -> TestResult {
        let uuid = SaleUuid::new();
        let current = make_warranted_sale(uuid);

        let mut repo = MockSalesService::new();

        repo.expect_update_sale()
            .once()
            .withf(|_, _, update| {
                update.warranty
                    == WarrantyRequest {
                        has_warranty: None,
                        warranty_start: None,
                        warranty_months: Some(24),
                    }
            })
            .return_once(move |_, _, update| Ok(apply(&current, &update)));

        let mut res = TestClient::put(format!("http://example.com/sales/{uuid}"))
            .json(&json!({ "warranty_months": 24 }))
            .send(&make_service(repo))
            .await;

        let body: SaleResponse = res.take_json().await?;

        assert!(body.has_warranty);
        assert_eq!(body.warranty_start.as_deref(), Some("2025-01-01"));
        assert_eq!(body.warranty_end.as_deref(), Some("2027-01-01"));
        assert_eq!(body.warranty_months, Some(24));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_update_passes_nothing_through() -> TestResult {
        let uuid = SaleUuid::new();
        let current = make_warranted_sale(uuid);

        let mut repo = MockSalesService::new();

        repo.expect_update_sale()
            .once()
            .withf(|_, _, update| *update == SaleUpdate::default())
            .return_once(move |_, _, _| Ok(current));

        let res = TestClient::put(format!("http://example.com/sales/{uuid}"))
            .json(&json!({}))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_sale_returns_404() -> TestResult {
        let mut repo = MockSalesService::new();

        repo.expect_update_sale()
            .once()
            .return_once(|_, _, _| Err(SalesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/sales/{}", SaleUuid::new()))
            .json(&json!({ "quantity": 3 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_malformed_sold_at_returns_422() -> TestResult {
        let mut repo = MockSalesService::new();

        repo.expect_update_sale().never();

        let res = TestClient::put(format!("http://example.com/sales/{}", SaleUuid::new()))
            .json(&json!({ "sold_at": "31/01/2025" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
