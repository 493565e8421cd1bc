//! Get Staff Member Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::staff::records::{StaffRecord, StaffRole};

use crate::{extensions::*, staff::errors::into_status_error, state::State};

/// Staff role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StaffRoleBody {
    Owner,
    Manager,
    #[default]
    Sales,
}

impl From<StaffRoleBody> for StaffRole {
    fn from(role: StaffRoleBody) -> Self {
        match role {
            StaffRoleBody::Owner => StaffRole::Owner,
            StaffRoleBody::Manager => StaffRole::Manager,
            StaffRoleBody::Sales => StaffRole::Sales,
        }
    }
}

impl From<StaffRole> for StaffRoleBody {
    fn from(role: StaffRole) -> Self {
        match role {
            StaffRole::Owner => StaffRoleBody::Owner,
            StaffRole::Manager => StaffRoleBody::Manager,
            StaffRole::Sales => StaffRoleBody::Sales,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StaffResponse {
    /// The unique identifier of the staff member
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: Option<String>,

    /// Shop role
    pub role: StaffRoleBody,

    /// Commission on revenue in basis points
    pub commission_rate_bps: u32,

    /// Revenue target in minor currency units
    pub sales_target: u64,

    /// The date and time the staff member was added
    pub created_at: String,

    /// The date and time the staff member was last updated
    pub updated_at: String,
}

impl From<StaffRecord> for StaffResponse {
    fn from(staff: StaffRecord) -> Self {
        StaffResponse {
            uuid: staff.uuid.into(),
            name: staff.name,
            email: staff.email,
            role: staff.role.into(),
            commission_rate_bps: staff.commission_rate_bps,
            sales_target: staff.sales_target,
            created_at: staff.created_at.to_string(),
            updated_at: staff.updated_at.to_string(),
        }
    }
}

/// Get Staff Member Handler
#[endpoint(
    tags("staff"),
    summary = "Get Staff Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Staff member found"),
        (status_code = StatusCode::NOT_FOUND, description = "Staff member not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    staff: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<StaffResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let staff = state
        .app
        .staff
        .get_staff(tenant, staff.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(staff.into()))
}
