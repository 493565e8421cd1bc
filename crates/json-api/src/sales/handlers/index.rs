//! Sale Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::domain::sales::data::SalesFilter;

use crate::{
    extensions::*,
    sales::{errors::into_status_error, get::SaleResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesResponse {
    /// The list of sales
    pub sales: Vec<SaleResponse>,
}

/// Sale Index Handler
///
/// Returns current sales, newest first, optionally bounded by inclusive `from`/`to` dates.
#[endpoint(
    tags("sales"),
    summary = "List Sales",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sales listed"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid date range"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    from: QueryParam<String, false>,
    to: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SalesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let filter = SalesFilter {
        from: from.into_date("from")?,
        to: to.into_date("to")?,
    };

    let sales = state
        .app
        .sales
        .list_sales(tenant, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SalesResponse {
        sales: sales.into_iter().map(Into::into).collect(),
    }))
}
