//! Warranty Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    warranties::{errors::into_status_error, get::WarrantyResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WarrantiesResponse {
    /// The list of filed warranties
    pub warranties: Vec<WarrantyResponse>,
}

/// Warranty Index Handler
///
/// Returns filed warranties, newest first.
#[endpoint(
    tags("warranties"),
    summary = "List Warranties",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WarrantiesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let warranties = state
        .app
        .warranties
        .list_warranties(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(WarrantiesResponse {
        warranties: warranties.into_iter().map(Into::into).collect(),
    }))
}
