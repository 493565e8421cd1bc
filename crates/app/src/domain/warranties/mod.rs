//! Warranties
//!
//! Filed warranties are standalone records, optionally linked to a sale. They are never
//! touched when a sale's inline warranty is cleared.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::WarrantiesServiceError;
pub use service::*;
