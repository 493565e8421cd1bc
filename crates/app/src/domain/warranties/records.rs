//! Warranty Records

use jiff::Timestamp;
use shopfront::warranty::{WarrantyDetails, WarrantyTerms};

use crate::{
    domain::{sales::records::SaleUuid, staff::records::StaffUuid},
    uuids::TypedUuid,
};

/// Warranty UUID
pub type WarrantyUuid = TypedUuid<WarrantyRecord>;

/// Filed Warranty Record
#[derive(Debug, Clone, PartialEq)]
pub struct WarrantyRecord {
    pub uuid: WarrantyUuid,
    pub sale_uuid: Option<SaleUuid>,

    /// Staff member who filed the warranty.
    pub staff_uuid: StaffUuid,

    /// Product name as it was when the warranty was filed.
    pub product_name: String,

    pub warranty_details: WarrantyDetails,
    pub warranty_months: i64,
    pub terms: WarrantyTerms,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
