//! App Router

use salvo::Router;

use crate::{auth, products, reports, sales, staff, warranties};

/// Routes that require a tenant bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("staff")
                .get(staff::index::handler)
                .post(staff::create::handler)
                .push(
                    Router::with_path("{staff}")
                        .get(staff::get::handler)
                        .put(staff::update::handler)
                        .delete(staff::delete::handler),
                ),
        )
        .push(
            Router::with_path("sales")
                .get(sales::index::handler)
                .post(sales::create::handler)
                .push(
                    Router::with_path("{sale}")
                        .get(sales::get::handler)
                        .put(sales::update::handler)
                        .delete(sales::delete::handler),
                ),
        )
        .push(
            Router::with_path("warranties")
                .get(warranties::index::handler)
                .post(warranties::create::handler)
                .push(Router::with_path("{warranty}").get(warranties::get::handler)),
        )
        .push(Router::with_path("reports/sales").get(reports::sales::handler))
}
