//! Get Sale Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::sales::records::SaleRecord;

use crate::{
    extensions::*,
    sales::errors::into_status_error,
    state::State,
    warranty_fields::{TermsFields, WarrantyDetailsBody},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaleResponse {
    /// The unique identifier of the sale
    pub uuid: Uuid,

    /// The product sold
    pub product_uuid: Uuid,

    /// The staff member who made the sale
    pub staff_uuid: Uuid,

    /// Units sold
    pub quantity: u32,

    /// Product price at the time of sale, in minor currency units
    pub unit_price: u64,

    /// Sale total in minor currency units
    pub total: u64,

    /// The date of the sale
    pub sold_at: String,

    /// Whether the sale carries a warranty
    pub has_warranty: bool,

    /// Warranty start date, null without a warranty
    pub warranty_start: Option<String>,

    /// Warranty end date, null without a warranty or duration
    pub warranty_end: Option<String>,

    /// `active`, `expired` or `unknown`; null without a warranty
    pub warranty_status: Option<String>,

    /// Warranty duration in months
    pub warranty_months: Option<i64>,

    /// Customer and device details
    pub warranty_details: WarrantyDetailsBody,

    /// The date and time the sale was recorded
    pub created_at: String,

    /// The date and time the sale was last updated
    pub updated_at: String,
}

impl From<SaleRecord> for SaleResponse {
    fn from(sale: SaleRecord) -> Self {
        let has_warranty = sale.has_warranty();
        let terms = TermsFields::from(sale.warranty.as_ref().map(|warranty| &warranty.terms));

        SaleResponse {
            uuid: sale.uuid.into(),
            product_uuid: sale.product_uuid.into(),
            staff_uuid: sale.staff_uuid.into(),
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            total: sale.total,
            sold_at: sale.sold_at.to_string(),
            has_warranty,
            warranty_start: terms.warranty_start,
            warranty_end: terms.warranty_end,
            warranty_status: terms.warranty_status,
            warranty_months: sale.warranty.map(|warranty| warranty.months),
            warranty_details: sale.warranty_details.into(),
            created_at: sale.created_at.to_string(),
            updated_at: sale.updated_at.to_string(),
        }
    }
}

/// Get Sale Handler
///
/// Returns a sale with its warranty terms.
#[endpoint(
    tags("sales"),
    summary = "Get Sale",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sale found"),
        (status_code = StatusCode::NOT_FOUND, description = "Sale not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    sale: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SaleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let sale = state
        .app
        .sales
        .get_sale(tenant, sale.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(sale.into()))
}
