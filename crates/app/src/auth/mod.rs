//! Authentication
//!
//! Tenants authenticate with bearer API tokens. Only a SHA-256 digest of each token is stored;
//! the raw token is shown once when it is issued.

mod errors;
mod records;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use records::*;
pub use service::*;
pub use token::*;
