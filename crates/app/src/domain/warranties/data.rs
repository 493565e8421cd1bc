//! Warranties Data

use shopfront::warranty::{WarrantyDetails, WarrantyInput};

use crate::domain::{
    sales::records::SaleUuid, staff::records::StaffUuid, warranties::records::WarrantyUuid,
};

/// New Warranty Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewWarranty {
    pub uuid: WarrantyUuid,
    pub sale_uuid: Option<SaleUuid>,
    pub staff_uuid: StaffUuid,

    /// Defaults to the linked sale's product name.
    pub product_name: Option<String>,

    pub warranty_details: WarrantyDetails,
    pub input: WarrantyInput,
}
