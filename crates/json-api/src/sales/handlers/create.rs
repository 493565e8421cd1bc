//! Create Sale Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use shopfront::warranty::{WarrantyRequest, lenient_months};
use uuid::Uuid;

use shopfront_app::domain::sales::data::NewSale;

use crate::{
    extensions::*,
    observability::record_sale,
    sales::{errors::into_status_error, get::SaleResponse},
    state::State,
    warranty_fields::{WarrantyDetailsBody, parse_date, parse_start},
};

/// Create Sale Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateSaleRequest {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub staff_uuid: Uuid,
    pub quantity: u32,

    /// ISO date of the sale; defaults to today
    #[serde(default)]
    pub sold_at: Option<String>,

    #[serde(default)]
    pub has_warranty: Option<bool>,

    /// ISO date or date-time; defaults to today
    #[serde(default)]
    pub warranty_start: Option<String>,

    /// Duration in months; non-numeric values count as zero
    #[serde(default, deserialize_with = "lenient_months")]
    pub warranty_months: Option<i64>,

    #[serde(default)]
    pub warranty_details: WarrantyDetailsBody,
}

impl TryFrom<CreateSaleRequest> for NewSale {
    type Error = StatusError;

    fn try_from(request: CreateSaleRequest) -> Result<Self, Self::Error> {
        Ok(NewSale {
            uuid: request.uuid.into(),
            product_uuid: request.product_uuid.into(),
            staff_uuid: request.staff_uuid.into(),
            quantity: request.quantity,
            sold_at: parse_date("sold_at", request.sold_at.as_deref())?,
            warranty: WarrantyRequest {
                has_warranty: request.has_warranty,
                warranty_start: parse_start(request.warranty_start.as_deref())?,
                warranty_months: request.warranty_months,
            },
            warranty_details: request.warranty_details.try_into()?,
        })
    }
}

/// Create Sale Handler
///
/// Records a sale, decrementing product stock and computing warranty terms when requested.
#[endpoint(
    tags("sales"),
    summary = "Create Sale",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Sale created"),
        (status_code = StatusCode::CONFLICT, description = "Sale already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid quantity, stock, reference or date"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "sales.create",
    skip(json, depot, res),
    fields(
        tenant_uuid = tracing::field::Empty,
        sale_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        staff_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSaleRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SaleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("sale_uuid", tracing::field::display(request.uuid));
    span.record("product_uuid", tracing::field::display(request.product_uuid));
    span.record("staff_uuid", tracing::field::display(request.staff_uuid));

    let sale = state
        .app
        .sales
        .create_sale(tenant, request.try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/sales/{}", sale.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    record_sale(sale.has_warranty());

    tracing::info!(
        sale_uuid = %sale.uuid,
        quantity = sale.quantity,
        total = sale.total,
        has_warranty = sale.has_warranty(),
        "created sale"
    );

    Ok(Json(sale.into()))
}
