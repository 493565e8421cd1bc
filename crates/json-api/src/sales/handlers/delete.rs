//! Delete Sale Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, sales::errors::into_status_error, state::State};

/// Delete Sale Handler
///
/// Soft-deletes a sale and returns its units to stock.
#[endpoint(
    tags("sales"),
    summary = "Delete Sale",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sale deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Sale not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "sales.delete",
    skip(sale, depot),
    fields(
        tenant_uuid = tracing::field::Empty,
        sale_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    sale: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;
    let sale = sale.into_inner();

    let span = tracing::Span::current();

    span.record("tenant_uuid", tracing::field::display(tenant));
    span.record("sale_uuid", tracing::field::display(sale));

    state
        .app
        .sales
        .delete_sale(tenant, sale.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(sale_uuid = %sale, "deleted sale");

    Ok(StatusCode::OK)
}
