//! Reports service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use shopfront::commission::{commission, target_met, target_progress_bps};

use crate::{
    database::Db,
    domain::{
        reports::{
            errors::ReportsServiceError,
            records::{SalesSummary, SalesTotals, StaffSales},
            repository::{PgReportsRepository, StaffSalesRow},
        },
        tenants::records::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }
}

impl From<StaffSalesRow> for StaffSales {
    fn from(row: StaffSalesRow) -> Self {
        Self {
            commission: commission(row.revenue, row.commission_rate_bps),
            target_progress_bps: target_progress_bps(row.revenue, row.sales_target),
            target_met: target_met(row.revenue, row.sales_target),
            staff_uuid: row.staff_uuid,
            name: row.name,
            sales: row.sales,
            units: row.units,
            revenue: row.revenue,
            warranted_sales: row.warranted_sales,
            commission_rate_bps: row.commission_rate_bps,
            sales_target: row.sales_target,
        }
    }
}

fn totals(staff: &[StaffSales]) -> SalesTotals {
    staff.iter().fold(SalesTotals::default(), |totals, row| SalesTotals {
        sales: totals.sales.saturating_add(row.sales),
        units: totals.units.saturating_add(row.units),
        revenue: totals.revenue.saturating_add(row.revenue),
        warranted_sales: totals.warranted_sales.saturating_add(row.warranted_sales),
    })
}

#[async_trait]
impl ReportsService for PgReportsService {
    async fn sales_summary(
        &self,
        tenant: TenantUuid,
        from: Date,
        to: Date,
    ) -> Result<SalesSummary, ReportsServiceError> {
        if from > to {
            return Err(ReportsServiceError::InvalidDateRange);
        }

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let rows = self.repository.staff_sales(&mut tx, from, to).await?;

        tx.commit().await?;

        let staff: Vec<StaffSales> = rows.into_iter().map(StaffSales::from).collect();

        Ok(SalesSummary {
            from,
            to,
            totals: totals(&staff),
            staff,
        })
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Summarises sales between `from` and `to`, inclusive.
    async fn sales_summary(
        &self,
        tenant: TenantUuid,
        from: Date,
        to: Date,
    ) -> Result<SalesSummary, ReportsServiceError>;
}
