//! Products Data

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: u64,
    pub stock: u32,
}

/// Product Update Data
///
/// Replaces every editable field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: u64,
    pub stock: u32,
}

/// Product listing filter. Unset fields match every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductsFilter {
    /// Case-insensitive category match.
    pub category: Option<String>,

    /// Only products with at most this many units in stock.
    pub low_stock: Option<u32>,
}

impl ProductsFilter {
    /// Drop a blank category so it matches everything.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            category: self
                .category
                .map(|category| category.trim().to_string())
                .filter(|category| !category.is_empty()),
            ..self
        }
    }
}
