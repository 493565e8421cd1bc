//! Staff service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        staff::{
            data::{NewStaff, StaffUpdate},
            errors::StaffServiceError,
            records::{StaffRecord, StaffUuid},
            repository::PgStaffRepository,
        },
        tenants::records::TenantUuid,
    },
};

/// Highest commission rate, one hundred percent in basis points.
pub const MAX_COMMISSION_RATE_BPS: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct PgStaffService {
    db: Db,
    repository: PgStaffRepository,
}

impl PgStaffService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStaffRepository::new(),
        }
    }
}

fn check_terms(commission_rate_bps: u32, sales_target: u64) -> Result<(), StaffServiceError> {
    if commission_rate_bps > MAX_COMMISSION_RATE_BPS {
        return Err(StaffServiceError::InvalidCommissionRate);
    }

    i64::try_from(sales_target)?;

    Ok(())
}

#[async_trait]
impl StaffService for PgStaffService {
    async fn list_staff(&self, tenant: TenantUuid) -> Result<Vec<StaffRecord>, StaffServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let staff = self.repository.list_staff(&mut tx).await?;

        tx.commit().await?;

        Ok(staff)
    }

    async fn get_staff(
        &self,
        tenant: TenantUuid,
        staff: StaffUuid,
    ) -> Result<StaffRecord, StaffServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let staff = self.repository.get_staff(&mut tx, staff).await?;

        tx.commit().await?;

        Ok(staff)
    }

    async fn create_staff(
        &self,
        tenant: TenantUuid,
        staff: NewStaff,
    ) -> Result<StaffRecord, StaffServiceError> {
        check_terms(staff.commission_rate_bps, staff.sales_target)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let created = self.repository.create_staff(&mut tx, &staff).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_staff(
        &self,
        tenant: TenantUuid,
        staff: StaffUuid,
        update: StaffUpdate,
    ) -> Result<StaffRecord, StaffServiceError> {
        check_terms(update.commission_rate_bps, update.sales_target)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let updated = self.repository.update_staff(&mut tx, staff, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_staff(
        &self,
        tenant: TenantUuid,
        staff: StaffUuid,
    ) -> Result<(), StaffServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        if self.repository.delete_staff(&mut tx, staff).await? == 0 {
            return Err(StaffServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait StaffService: Send + Sync {
    /// Retrieves all current staff members.
    async fn list_staff(&self, tenant: TenantUuid) -> Result<Vec<StaffRecord>, StaffServiceError>;

    /// Retrieve a single staff member.
    async fn get_staff(
        &self,
        tenant: TenantUuid,
        staff: StaffUuid,
    ) -> Result<StaffRecord, StaffServiceError>;

    /// Adds a staff member.
    async fn create_staff(
        &self,
        tenant: TenantUuid,
        staff: NewStaff,
    ) -> Result<StaffRecord, StaffServiceError>;

    /// Replaces a staff member's editable fields.
    async fn update_staff(
        &self,
        tenant: TenantUuid,
        staff: StaffUuid,
        update: StaffUpdate,
    ) -> Result<StaffRecord, StaffServiceError>;

    /// Soft-deletes a staff member. Their recorded sales are kept.
    async fn delete_staff(
        &self,
        tenant: TenantUuid,
        staff: StaffUuid,
    ) -> Result<(), StaffServiceError>;
}
