//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    auth::{
        ApiTokenRecord, ApiTokenUuid, AuthServiceError, IssuedApiToken, generate_api_token,
        hash_api_token, parse_api_token, records::NewApiToken, repository::PgAuthRepository,
    },
    domain::tenants::records::TenantUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given tenant.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::InvalidReference`] for an unknown tenant, or a storage error.
    pub async fn issue_api_token(
        &self,
        tenant_uuid: TenantUuid,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = ApiTokenUuid::new();
        let token = generate_api_token(token_uuid);

        let record = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                tenant_uuid,
                token_hash: hash_api_token(&token),
            })
            .await?;

        info!(%tenant_uuid, token_uuid = %record.uuid, "issued api token");

        Ok(IssuedApiToken { token, record })
    }

    /// List all tokens for the given tenant, revoked ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        tenant_uuid: TenantUuid,
    ) -> Result<Vec<ApiTokenRecord>, AuthServiceError> {
        Ok(self.repository.list_api_tokens(tenant_uuid).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        let revoked = self.repository.revoke_api_token(token_uuid).await?;

        Ok(revoked.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<TenantUuid, AuthServiceError> {
        let token_uuid = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(token_uuid, &hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if let Err(error) = self.repository.touch_api_token(token.uuid).await {
            warn!(token_uuid = %token.uuid, "failed to record api token use: {error}");
        }

        Ok(token.tenant_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the tenant owning an active bearer token.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<TenantUuid, AuthServiceError>;
}
