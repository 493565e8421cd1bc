//! Shopfront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    commission::{commission, target_met, target_progress_bps},
    notifications::WarrantyNotice,
    warranty::{
        SaleWarranty, WarrantyDetails, WarrantyInput, WarrantyOutcome, WarrantyRequest,
        WarrantyStartParseError, WarrantyStatus, WarrantyTerms, WarrantyTransition, calculate,
        calculate_now, lenient_months, parse_warranty_start, today,
    },
};
