//! Tenants
//!
//! A tenant is one shop. Every other table hangs off `tenants.uuid` under row-level security.

pub mod data;
pub mod errors;
mod repository;
pub mod records;
pub mod service;

pub use errors::TenantsServiceError;
pub use service::*;
