//! Shopfront
//!
//! Shopfront is the domain core of a multi-tenant shop-management backend for phone and
//! accessory retailers: warranty terms, the warranty toggle policy applied to sales, customer
//! notification composition and commission arithmetic.

pub mod commission;
pub mod notifications;
pub mod prelude;
pub mod warranty;
