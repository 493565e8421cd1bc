//! Sales Data

use jiff::civil::Date;
use shopfront::warranty::{WarrantyDetails, WarrantyRequest};

use crate::domain::{
    products::records::ProductUuid, sales::records::SaleUuid, staff::records::StaffUuid,
};

/// New Sale Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub uuid: SaleUuid,
    pub product_uuid: ProductUuid,
    pub staff_uuid: StaffUuid,
    pub quantity: u32,

    /// Defaults to the current date.
    pub sold_at: Option<Date>,

    pub warranty: WarrantyRequest,
    pub warranty_details: WarrantyDetails,
}

/// Sale Update Data
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleUpdate {
    pub quantity: Option<u32>,
    pub sold_at: Option<Date>,
    pub warranty: WarrantyRequest,
    pub warranty_details: Option<WarrantyDetails>,
}

/// Inclusive `sold_at` bounds for listing sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesFilter {
    pub from: Option<Date>,
    pub to: Option<Date>,
}
