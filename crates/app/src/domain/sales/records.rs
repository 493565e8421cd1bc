//! Sale Records

use jiff::{Timestamp, civil::Date};
use shopfront::warranty::{SaleWarranty, WarrantyDetails};

use crate::{
    domain::{products::records::ProductUuid, staff::records::StaffUuid},
    uuids::TypedUuid,
};

/// Sale UUID
pub type SaleUuid = TypedUuid<SaleRecord>;

/// Sale Record
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub uuid: SaleUuid,
    pub product_uuid: ProductUuid,
    pub staff_uuid: StaffUuid,
    pub quantity: u32,

    /// Product price at the time of sale, in minor currency units.
    pub unit_price: u64,

    /// `unit_price × quantity`.
    pub total: u64,

    pub sold_at: Date,

    /// Inline warranty; `None` means every warranty column is null.
    pub warranty: Option<SaleWarranty>,

    pub warranty_details: WarrantyDetails,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl SaleRecord {
    #[must_use]
    pub const fn has_warranty(&self) -> bool {
        self.warranty.is_some()
    }
}
