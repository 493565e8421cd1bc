//! Tenants service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::domain::tenants::{
    data::NewTenant, errors::TenantsServiceError, records::TenantRecord,
    repository::PgTenantsRepository,
};

#[derive(Debug, Clone)]
pub struct PgTenantsService {
    repository: PgTenantsRepository,
}

impl PgTenantsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgTenantsRepository::new(pool),
        }
    }
}

#[async_trait]
impl TenantsService for PgTenantsService {
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError> {
        let name = tenant.name.trim();

        if name.is_empty() {
            return Err(TenantsServiceError::MissingName);
        }

        let created = self
            .repository
            .insert(&NewTenant {
                name: name.to_string(),
                ..tenant
            })
            .await?;

        info!(tenant_uuid = %created.uuid, "registered shop");

        Ok(created)
    }

    async fn list_tenants(&self) -> Result<Vec<TenantRecord>, TenantsServiceError> {
        Ok(self.repository.active().await?)
    }
}

/// Shop registration. Not tenant-scoped; used by the admin CLI.
#[automock]
#[async_trait]
pub trait TenantsService: Send + Sync {
    /// Registers a shop under the given UUID.
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError>;

    /// Shops that have not been deleted, oldest first.
    async fn list_tenants(&self) -> Result<Vec<TenantRecord>, TenantsServiceError>;
}
