//! Test Helpers

use shopfront::warranty::{WarrantyDetails, WarrantyRequest};

use crate::domain::{
    products::{data::NewProduct, records::ProductUuid},
    sales::{data::NewSale, records::SaleUuid},
    staff::{
        data::NewStaff,
        records::{StaffRole, StaffUuid},
    },
};

pub(crate) fn new_product(uuid: ProductUuid, name: &str, price: u64, stock: u32) -> NewProduct {
    NewProduct {
        uuid,
        name: name.to_string(),
        sku: None,
        category: None,
        price,
        stock,
    }
}

pub(crate) fn new_staff(uuid: StaffUuid, name: &str) -> NewStaff {
    NewStaff {
        uuid,
        name: name.to_string(),
        email: None,
        role: StaffRole::Sales,
        commission_rate_bps: 0,
        sales_target: 0,
    }
}

/// A sale without a warranty, sold today.
pub(crate) fn new_sale(product: ProductUuid, staff: StaffUuid, quantity: u32) -> NewSale {
    NewSale {
        uuid: SaleUuid::new(),
        product_uuid: product,
        staff_uuid: staff,
        quantity,
        sold_at: None,
        warranty: WarrantyRequest::default(),
        warranty_details: WarrantyDetails::default(),
    }
}
