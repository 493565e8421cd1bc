//! Delete Staff Member Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, staff::errors::into_status_error, state::State};

/// Delete Staff Member Handler
///
/// Soft-deletes a staff member; their recorded sales and reports are kept.
#[endpoint(
    tags("staff"),
    summary = "Delete Staff Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Staff member deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Staff member not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "staff.delete",
    skip(staff, depot),
    fields(
        tenant_uuid = tracing::field::Empty,
        staff_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    staff: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let staff = staff.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("staff_uuid", tracing::field::display(staff));

    state
        .app
        .staff
        .delete_staff(tenant, staff.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(staff_uuid = %staff, "deleted staff member");

    Ok(StatusCode::OK)
}
