//! Commission & Targets
//!
//! Amounts are in minor currency units. Rates and progress are basis points, so `10_000` is
//! one hundred percent.

const BASIS_POINTS: u128 = 10_000;

/// Commission earned on `revenue` at `rate_bps`, rounded down.
#[must_use]
pub fn commission(revenue: u64, rate_bps: u32) -> u64 {
    let earned = u128::from(revenue) * u128::from(rate_bps) / BASIS_POINTS;

    u64::try_from(earned).unwrap_or(u64::MAX)
}

/// Progress towards a sales target in basis points, or `None` when no target is set.
#[must_use]
pub fn target_progress_bps(revenue: u64, target: u64) -> Option<u32> {
    if target == 0 {
        return None;
    }

    let progress = u128::from(revenue) * BASIS_POINTS / u128::from(target);

    Some(u32::try_from(progress).unwrap_or(u32::MAX))
}

/// Whether `revenue` reaches a non-zero `target`.
#[must_use]
pub fn target_met(revenue: u64, target: u64) -> bool {
    target > 0 && revenue >= target
}
