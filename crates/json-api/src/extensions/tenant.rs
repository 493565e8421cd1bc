//! Authenticated tenant stored in the depot.

use salvo::prelude::{Depot, StatusError};
use shopfront_app::domain::tenants::records::TenantUuid;

/// Carries the tenant resolved by the auth middleware to handlers.
pub(crate) trait TenantDepotExt {
    fn insert_tenant_uuid(&mut self, tenant: TenantUuid);

    fn tenant_uuid_or_401(&self) -> Result<TenantUuid, StatusError>;
}

impl TenantDepotExt for Depot {
    fn insert_tenant_uuid(&mut self, tenant: TenantUuid) {
        self.inject(tenant);
    }

    fn tenant_uuid_or_401(&self) -> Result<TenantUuid, StatusError> {
        self.obtain::<TenantUuid>()
            .copied()
            .map_err(|_missing| StatusError::unauthorized())
    }
}
