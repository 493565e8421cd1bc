//! Get Warranty Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::warranties::records::WarrantyRecord;

use crate::{
    extensions::*, state::State, warranties::errors::into_status_error,
    warranty_fields::WarrantyDetailsBody,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WarrantyResponse {
    /// The unique identifier of the warranty
    pub uuid: Uuid,

    /// The sale the warranty was filed against, if any
    pub sale_uuid: Option<Uuid>,

    /// The staff member who filed the warranty
    pub staff_uuid: Uuid,

    /// Product covered by the warranty
    pub product_name: String,

    /// Warranty start date
    pub warranty_start: String,

    /// Warranty end date, null without a duration
    pub warranty_end: Option<String>,

    /// `active`, `expired` or `unknown`
    pub warranty_status: String,

    /// Warranty duration in months
    pub warranty_months: i64,

    /// Customer and device details
    pub warranty_details: WarrantyDetailsBody,

    /// The date and time the warranty was filed
    pub created_at: String,

    /// The date and time the warranty was last updated
    pub updated_at: String,
}

impl From<WarrantyRecord> for WarrantyResponse {
    fn from(warranty: WarrantyRecord) -> Self {
        WarrantyResponse {
            uuid: warranty.uuid.into(),
            sale_uuid: warranty.sale_uuid.map(Into::into),
            staff_uuid: warranty.staff_uuid.into(),
            product_name: warranty.product_name,
            warranty_start: warranty.terms.warranty_start.to_string(),
            warranty_end: warranty.terms.warranty_end.map(|end| end.to_string()),
            warranty_status: warranty.terms.warranty_status.to_string(),
            warranty_months: warranty.warranty_months,
            warranty_details: warranty.warranty_details.into(),
            created_at: warranty.created_at.to_string(),
            updated_at: warranty.updated_at.to_string(),
        }
    }
}

/// Get Warranty Handler
///
/// Returns a filed warranty.
#[endpoint(
    tags("warranties"),
    summary = "Get Warranty",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Warranty found"),
        (status_code = StatusCode::NOT_FOUND, description = "Warranty not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    warranty: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<WarrantyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let warranty = state
        .app
        .warranties
        .get_warranty(tenant, warranty.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(warranty.into()))
}
