//! Create Staff Member Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::staff::data::NewStaff;

use crate::{
    extensions::*,
    staff::{
        errors::into_status_error,
        get::{StaffResponse, StaffRoleBody},
    },
    state::State,
};

/// Create Staff Member Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateStaffRequest {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: StaffRoleBody,
    #[serde(default)]
    pub commission_rate_bps: u32,
    #[serde(default)]
    pub sales_target: u64,
}

impl From<CreateStaffRequest> for NewStaff {
    fn from(request: CreateStaffRequest) -> Self {
        NewStaff {
            uuid: request.uuid.into(),
            name: request.name,
            email: request.email,
            role: request.role.into(),
            commission_rate_bps: request.commission_rate_bps,
            sales_target: request.sales_target,
        }
    }
}

/// Create Staff Member Handler
#[endpoint(
    tags("staff"),
    summary = "Create Staff Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Staff member created"),
        (status_code = StatusCode::CONFLICT, description = "Staff member already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid commission or target"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "staff.create",
    skip(json, depot, res),
    fields(
        tenant_uuid = tracing::field::Empty,
        staff_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateStaffRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<StaffResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("staff_uuid", tracing::field::display(request.uuid));

    let staff = state
        .app
        .staff
        .create_staff(tenant, request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/staff/{}", staff.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(staff_uuid = %staff.uuid, role = %staff.role, "created staff member");

    Ok(Json(staff.into()))
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
        staff_service(repo, Router::with_path("staff").post(handler))
    }

    #[tokio::test]
    async fn test_create_staff_defaults_role_and_terms() -> TestResult {
        let uuid = StaffUuid::new();
        let staff = make_staff(uuid);

        let mut repo = MockStaffService::new();

        repo.expect_create_staff()
            .once()
            .withf(move |tenant, new| {
                *tenant == TEST_TENANT_UUID
                    && *new
                        == NewStaff {
                            uuid,
                            name: "Grace".to_string(),
                            email: None,
                            role: StaffRole::Sales,
                            commission_rate_bps: 0,
                            sales_target: 0,
                        }
            })
            .return_once(move |_, _| Ok(staff));

        let mut res = TestClient::post("http://example.com/staff")
            .json(&json!({ "uuid": uuid.into_uuid(), "name": "Grace" }))
            .send(&make_service(repo))
            .await;

        let body: StaffResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/staff/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_staff_excessive_commission_returns_422() -> TestResult {
        let mut repo = MockStaffService::new();

        repo.expect_create_staff()
            .once()
            .withf(|_, new| new.commission_rate_bps == 12_000 && new.role == StaffRole::Manager)
            .return_once(|_, _| Err(StaffServiceError::InvalidCommissionRate));

        let res = TestClient::post("http://example.com/staff")
            .json(&json!({
                "uuid": StaffUuid::new().into_uuid(),
                "name": "Greedy",
                "role": "manager",
                "commission_rate_bps": 12_000,
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_staff_unknown_role_returns_400() -> TestResult {
        let mut repo = MockStaffService::new();

        repo.expect_create_staff().never();

        let res = TestClient::post("http://example.com/staff")
            .json(&json!({ "uuid": StaffUuid::new().into_uuid(), "name": "Ada", "role": "cashier" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_staff_duplicate_email_returns_409() -> TestResult {
        let mut repo = MockStaffService::new();

        repo.expect_create_staff()
            .once()
            .return_once(|_, _| Err(StaffServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/staff")
            .json(&json!({
                "uuid": StaffUuid::new().into_uuid(),
                "name": "Twin",
                "email": "twin@example.com",
            }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
