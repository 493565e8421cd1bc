//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shopfront_app::domain::products::data::ProductsFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

fn parse_low_stock(value: Option<String>) -> Result<Option<u32>, StatusError> {
    value
        .map(|value| value.trim().parse::<u32>())
        .transpose()
        .or_422("could not parse \"low_stock\" query parameter")
}

/// Product Index Handler
///
/// Returns current products sorted by name. `category` matches case-insensitively; `low_stock`
/// keeps products with at most that many units left.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Products listed"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid low_stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.index",
    skip(category, low_stock, depot),
    fields(tenant_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    low_stock: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    tracing::Span::current().record("tenant_uuid", tracing::field::display(tenant));

    let filter = ProductsFilter {
        category: category.into_inner(),
        low_stock: parse_low_stock(low_stock.into_inner())?,
    };

    let products = state
        .app
        .products
        .list_products(tenant, filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
