//! Report Records

use jiff::civil::Date;

use crate::domain::staff::records::StaffUuid;

/// Sales performance over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    pub from: Date,
    pub to: Date,
    pub totals: SalesTotals,

    /// One row per staff member, highest revenue first.
    pub staff: Vec<StaffSales>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesTotals {
    pub sales: u64,
    pub units: u64,
    pub revenue: u64,
    pub warranted_sales: u64,
}

/// A staff member's sales, commission and target progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffSales {
    pub staff_uuid: StaffUuid,
    pub name: String,
    pub sales: u64,
    pub units: u64,
    pub revenue: u64,
    pub warranted_sales: u64,
    pub commission_rate_bps: u32,
    pub commission: u64,
    pub sales_target: u64,

    /// Revenue as basis points of the target; `None` when no target is set.
    pub target_progress_bps: Option<u32>,

    pub target_met: bool,
}
