//! Warranties
//!
//! Warranty terms are derived from a start date and a duration in calendar months. Sales carry
//! an optional inline warranty whose lifecycle is driven by [`WarrantyRequest::on_create`] and
//! [`WarrantyRequest::on_update`].

mod calculator;
mod details;
mod input;
mod terms;
mod toggle;

pub use calculator::{calculate, calculate_now, today};
pub use details::{InvalidEmailError, WarrantyDetails, parse_email};
pub use input::{WarrantyInput, WarrantyStartParseError, lenient_months, parse_warranty_start};
pub use terms::{UnknownWarrantyStatus, WarrantyStatus, WarrantyTerms};
pub use toggle::{SaleWarranty, WarrantyOutcome, WarrantyRequest, WarrantyTransition};
