//! Staff Data

use crate::domain::staff::records::{StaffRole, StaffUuid};

/// New Staff Member Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewStaff {
    pub uuid: StaffUuid,
    pub name: String,
    pub email: Option<String>,
    pub role: StaffRole,
    pub commission_rate_bps: u32,
    pub sales_target: u64,
}

/// Staff Member Update Data
///
/// Replaces every editable field.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffUpdate {
    pub name: String,
    pub email: Option<String>,
    pub role: StaffRole,
    pub commission_rate_bps: u32,
    pub sales_target: u64,
}
