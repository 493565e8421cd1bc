//! Staff Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Staff UUID
pub type StaffUuid = TypedUuid<StaffRecord>;

/// What a staff member is allowed to do in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffRole {
    Owner,
    Manager,
    Sales,
}

impl StaffRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Sales => "sales",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown staff role `{0}`")]
pub struct UnknownStaffRole(pub String);

impl FromStr for StaffRole {
    type Err = UnknownStaffRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "manager" => Ok(Self::Manager),
            "sales" => Ok(Self::Sales),
            other => Err(UnknownStaffRole(other.to_string())),
        }
    }
}

/// Staff Record
#[derive(Debug, Clone, PartialEq)]
pub struct StaffRecord {
    pub uuid: StaffUuid,

    /// Display name, also used as the acting user on warranty emails.
    pub name: String,

    pub email: Option<String>,
    pub role: StaffRole,

    /// Commission on sales revenue in basis points.
    pub commission_rate_bps: u32,

    /// Revenue target in minor currency units; zero means no target.
    pub sales_target: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_from_their_stored_names() {
        for role in [StaffRole::Owner, StaffRole::Manager, StaffRole::Sales] {
            assert_eq!(role.as_str().parse::<StaffRole>().ok(), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("cashier".parse::<StaffRole>().is_err());
    }
}
