//! Sales
//!
//! A sale snapshots the product's unit price, takes the sold quantity out of stock and may carry
//! an inline warranty. Deleting a sale puts the quantity back.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::SalesServiceError;
pub use service::*;
