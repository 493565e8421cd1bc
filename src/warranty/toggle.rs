//! Warranty Toggle
//!
//! A sale is either without a warranty or warranted. Creating a sale with `has_warranty`
//! computes terms; updating it with `has_warranty = false` always clears them, and supplying a
//! new duration or start date on a warranted sale recomputes them in place.

use jiff::civil::Date;

use crate::warranty::{WarrantyInput, WarrantyTerms, calculate};

/// Warranty state stored inline on a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleWarranty {
    /// Duration the terms were computed from.
    pub months: i64,

    /// Computed start, end and status.
    pub terms: WarrantyTerms,
}

/// Warranty fields of a sale create or update request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarrantyRequest {
    /// Whether the sale carries a warranty; `None` when the request does not say.
    pub has_warranty: Option<bool>,

    /// Requested start date.
    pub warranty_start: Option<Date>,

    /// Requested duration in months.
    pub warranty_months: Option<i64>,
}

/// How a request changed a sale's warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarrantyTransition {
    /// The sale went from no warranty to warranted.
    Enabled,

    /// A warranted sale had its terms recomputed.
    Recomputed,

    /// A warranted sale lost its warranty.
    Cleared,

    /// Nothing changed.
    Unchanged,
}

impl WarrantyTransition {
    /// Whether the customer should be told about a newly registered warranty.
    #[must_use]
    pub const fn notifies_customer(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Warranty state to persist, and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarrantyOutcome {
    /// State to write; `None` means every warranty field is null.
    pub warranty: Option<SaleWarranty>,

    /// The transition that produced it.
    pub transition: WarrantyTransition,
}

impl WarrantyOutcome {
    /// Value of the sale's `has_warranty` flag.
    #[must_use]
    pub const fn has_warranty(&self) -> bool {
        self.warranty.is_some()
    }

    /// Computed terms, if warranted.
    #[must_use]
    pub fn terms(&self) -> Option<&WarrantyTerms> {
        self.warranty.as_ref().map(|warranty| &warranty.terms)
    }

    fn none(transition: WarrantyTransition) -> Self {
        Self {
            warranty: None,
            transition,
        }
    }
}

impl WarrantyRequest {
    /// Decide the warranty state of a new sale.
    #[must_use]
    pub fn on_create(&self, today: Date) -> WarrantyOutcome {
        if self.has_warranty != Some(true) {
            return WarrantyOutcome::none(WarrantyTransition::Unchanged);
        }

        WarrantyOutcome {
            warranty: Some(compute(self.warranty_start, self.warranty_months, today)),
            transition: WarrantyTransition::Enabled,
        }
    }

    /// Decide the warranty state of an existing sale.
    ///
    /// An explicit `has_warranty = false` wins over any duration in the same request. When the
    /// sale is already warranted, a new duration or start date recomputes the terms, keeping the
    /// stored value of whichever one was not supplied.
    #[must_use]
    pub fn on_update(&self, current: Option<&SaleWarranty>, today: Date) -> WarrantyOutcome {
        match (self.has_warranty, current) {
            (Some(false), Some(_)) => WarrantyOutcome::none(WarrantyTransition::Cleared),
            (Some(false) | None, None) => WarrantyOutcome::none(WarrantyTransition::Unchanged),
            (Some(true), None) => WarrantyOutcome {
                warranty: Some(compute(self.warranty_start, self.warranty_months, today)),
                transition: WarrantyTransition::Enabled,
            },
            (Some(true) | None, Some(existing)) => {
                if self.warranty_months.is_none() && self.warranty_start.is_none() {
                    return WarrantyOutcome {
                        warranty: Some(*existing),
                        transition: WarrantyTransition::Unchanged,
                    };
                }

                let start = self
                    .warranty_start
                    .or(Some(existing.terms.warranty_start));
                let months = self.warranty_months.or(Some(existing.months));

                WarrantyOutcome {
                    warranty: Some(compute(start, months, today)),
                    transition: WarrantyTransition::Recomputed,
                }
            }
        }
    }
}

fn compute(start: Option<Date>, months: Option<i64>, today: Date) -> SaleWarranty {
    let input = WarrantyInput {
        warranty_start: start,
        warranty_months: months,
    };

    SaleWarranty {
        months: input.months(),
        terms: calculate(input, today),
    }
}
