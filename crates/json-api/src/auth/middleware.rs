//! Bearer token authentication.
//!
//! Resolves `Authorization: Bearer <token>` to the tenant that owns the token and injects its
//! uuid into the depot for the handlers behind this hoop.

use std::sync::Arc;

use salvo::{
    http::header::{AUTHORIZATION, HeaderValue, WWW_AUTHENTICATE},
    prelude::*,
};
use shopfront_app::{auth::AuthServiceError, domain::tenants::records::TenantUuid};
use tracing::{debug, error};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(tenant_uuid) => {
            depot.insert_tenant_uuid(tenant_uuid);

            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            if status.code == StatusCode::UNAUTHORIZED {
                res.headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            }

            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<TenantUuid, StatusError> {
    let token = extract_bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|error| match error {
            AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid API token"),
            AuthServiceError::InvalidReference => {
                debug!("api token refers to a missing tenant");

                StatusError::unauthorized().brief("Invalid API token")
            }
            AuthServiceError::Sql(source) => {
                error!("failed to validate api token: {source}");

                StatusError::internal_server_error()
            }
        })
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
