//! Shop Domain Concerns

pub mod products;
pub mod reports;
pub mod sales;
pub mod staff;
pub mod tenants;
pub mod warranties;
