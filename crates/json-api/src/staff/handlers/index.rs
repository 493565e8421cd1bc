//! Staff Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    staff::{errors::into_status_error, get::StaffResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StaffListResponse {
    /// Current staff members
    pub staff: Vec<StaffResponse>,
}

/// Staff Index Handler
#[endpoint(
    tags("staff"),
    summary = "List Staff",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StaffListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let staff = state
        .app
        .staff
        .list_staff(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(StaffListResponse {
        staff: staff.into_iter().map(Into::into).collect(),
    }))
}
