//! Update Staff Member Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::staff::data::StaffUpdate;

use crate::{
    extensions::*,
    staff::{
        errors::into_status_error,
        get::{StaffResponse, StaffRoleBody},
    },
    state::State,
};

/// Update Staff Member Request
///
/// Replaces every editable field.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStaffRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: StaffRoleBody,
    pub commission_rate_bps: u32,
    pub sales_target: u64,
}

impl From<UpdateStaffRequest> for StaffUpdate {
    fn from(request: UpdateStaffRequest) -> Self {
        StaffUpdate {
            name: request.name,
            email: request.email,
            role: request.role.into(),
            commission_rate_bps: request.commission_rate_bps,
            sales_target: request.sales_target,
        }
    }
}

/// Update Staff Member Handler
#[endpoint(
    tags("staff"),
    summary = "Update Staff Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Staff member updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Staff member not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid commission or target"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "staff.update",
    skip(staff, json, depot),
    fields(
        tenant_uuid = tracing::field::Empty,
        staff_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    staff: PathParam<Uuid>,
    json: JsonBody<UpdateStaffRequest>,
    depot: &mut Depot,
) -> Result<Json<StaffResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let staff = staff.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("staff_uuid", tracing::field::display(staff));

    let updated = state
        .app
        .staff
        .update_staff(tenant, staff.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(staff_uuid = %staff, "updated staff member");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopfront_app::domain::staff::{
        MockStaffService, StaffServiceError,
        records::{StaffRole, StaffUuid},
    };

    use crate::test_helpers::{TEST_TENANT_UUID, make_staff, staff_service};

    use super::*;

    fn make_service(repo: MockStaffService) -> Service {
        staff_service(repo, Router::with_path("staff/{staff}").put(handler))
    }

    #[tokio::test]
    async fn test_update_staff_promotes_member() -> TestResult {
        let uuid = StaffUuid::new();
        let mut staff = make_staff(uuid);
        staff.role = StaffRole::Manager;

        let mut repo = MockStaffService::new();

        repo.expect_update_staff()
            .once()
            .withf(move |tenant, s, update| {
                *tenant == TEST_TENANT_UUID
                    && *s == uuid
                    && update.role == StaffRole::Manager
                    && update.commission_rate_bps == 500
            })
            .return_once(move |_, _, _| Ok(staff));

        let mut res = TestClient::put(format!("http://example.com/staff/{uuid}"))
            .json(&json!({
                "name": "Grace",
                "role": "manager",
                "commission_rate_bps": 500,
                "sales_target": 1_000_000,
            }))
            .send(&make_service(repo))
            .await;

        let body: StaffResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.role, StaffRoleBody::Manager);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_staff_returns_404() -> TestResult {
        let mut repo = MockStaffService::new();

        repo.expect_update_staff()
            .once()
            .return_once(|_, _, _| Err(StaffServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/staff/{}", StaffUuid::new()))
            .json(&json!({
                "name": "Ghost",
                "role": "sales",
                "commission_rate_bps": 0,
                "sales_target": 0,
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
