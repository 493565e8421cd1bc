//! Sales Report Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopfront_app::domain::reports::records::{SalesSummary, SalesTotals, StaffSales};

use crate::{extensions::*, reports::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesTotalsResponse {
    /// Number of sales
    pub sales: u64,

    /// Units sold
    pub units: u64,

    /// Revenue in minor currency units
    pub revenue: u64,

    /// Sales carrying a warranty
    pub warranted_sales: u64,
}

impl From<SalesTotals> for SalesTotalsResponse {
    fn from(totals: SalesTotals) -> Self {
        SalesTotalsResponse {
            sales: totals.sales,
            units: totals.units,
            revenue: totals.revenue,
            warranted_sales: totals.warranted_sales,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StaffSalesResponse {
    pub staff_uuid: Uuid,
    pub name: String,
    pub sales: u64,
    pub units: u64,
    pub revenue: u64,
    pub warranted_sales: u64,
    pub commission_rate_bps: u32,

    /// Commission earned in minor currency units
    pub commission: u64,

    pub sales_target: u64,

    /// Revenue as basis points of the target; null when no target is set
    pub target_progress_bps: Option<u32>,

    pub target_met: bool,
}

impl From<StaffSales> for StaffSalesResponse {
    fn from(row: StaffSales) -> Self {
        StaffSalesResponse {
            staff_uuid: row.staff_uuid.into(),
            name: row.name,
            sales: row.sales,
            units: row.units,
            revenue: row.revenue,
            warranted_sales: row.warranted_sales,
            commission_rate_bps: row.commission_rate_bps,
            commission: row.commission,
            sales_target: row.sales_target,
            target_progress_bps: row.target_progress_bps,
            target_met: row.target_met,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesSummaryResponse {
    /// First day of the report, inclusive
    pub from: String,

    /// Last day of the report, inclusive
    pub to: String,

    pub totals: SalesTotalsResponse,

    /// Per-staff performance, highest revenue first
    pub staff: Vec<StaffSalesResponse>,
}

impl From<SalesSummary> for SalesSummaryResponse {
    fn from(summary: SalesSummary) -> Self {
        SalesSummaryResponse {
            from: summary.from.to_string(),
            to: summary.to.to_string(),
            totals: summary.totals.into(),
            staff: summary.staff.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sales Report Handler
///
/// Summarises sales, commission and target progress between two dates, inclusive.
#[endpoint(
    tags("reports"),
    summary = "Sales Report",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Report generated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing date"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid date range"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "reports.sales",
    skip(from, to, depot),
    fields(tenant_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    from: QueryParam<String, true>,
    to: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<SalesSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    tracing::Span::current().record("tenant_uuid", tracing::field::display(tenant));

    let from = from.into_date("from")?;
    let to = to.into_date("to")?;

    let summary = state
        .app
        .reports
        .sales_summary(tenant, from, to)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
