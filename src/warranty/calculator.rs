//! Warranty Calculator

use jiff::{Span, Zoned, civil::Date};

use crate::warranty::{WarrantyInput, WarrantyStatus, WarrantyTerms};

/// Compute warranty terms as of `today`.
///
/// The start defaults to `today`. A non-zero month count adds that many calendar months to the
/// start, clamping the day to the end of the resulting month (`2024-01-31` plus one month is
/// `2024-02-29`). Without a duration there is no end date and the status is
/// [`WarrantyStatus::Unknown`]; otherwise the warranty is active through its end date.
///
/// Negative month counts are not rejected: they produce an end date before the start.
#[must_use]
pub fn calculate(input: WarrantyInput, today: Date) -> WarrantyTerms {
    let warranty_start = input.warranty_start.unwrap_or(today);

    let warranty_end = match input.months() {
        0 => None,
        months => Some(add_months(warranty_start, months)),
    };

    let warranty_status = match warranty_end {
        None => WarrantyStatus::Unknown,
        Some(end) if today <= end => WarrantyStatus::Active,
        Some(_) => WarrantyStatus::Expired,
    };

    WarrantyTerms {
        warranty_start,
        warranty_end,
        warranty_status,
    }
}

/// Compute warranty terms as of the current date in the system time zone.
#[must_use]
pub fn calculate_now(input: WarrantyInput) -> WarrantyTerms {
    calculate(input, today())
}

/// The current date in the system time zone.
#[must_use]
pub fn today() -> Date {
    Zoned::now().date()
}

fn add_months(start: Date, months: i64) -> Date {
    let saturated = if months.is_negative() {
        Date::MIN
    } else {
        Date::MAX
    };

    Span::new()
        .try_months(months)
        .and_then(|span| start.checked_add(span))
        .unwrap_or(saturated)
}
