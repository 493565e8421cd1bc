//! Customer Notifications

use serde::{Deserialize, Serialize};

use crate::warranty::{WarrantyDetails, WarrantyTerms};

/// A warranty confirmation email, ready to hand to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyNotice {
    /// Recipient address.
    pub to: String,

    /// Subject line.
    pub subject: String,

    /// Plain-text body.
    pub body: String,
}

impl WarrantyNotice {
    /// Compose the confirmation for a registered warranty.
    ///
    /// `acting_user` is the display name of the staff member who recorded the sale or filed the
    /// warranty. Returns `None` when the details carry no customer email.
    #[must_use]
    pub fn compose(
        acting_user: &str,
        product_name: &str,
        details: &WarrantyDetails,
        terms: &WarrantyTerms,
    ) -> Option<Self> {
        let to = details.customer_email()?.to_string();

        let mut lines = vec![
            format!("Dear {},", details.customer_name().unwrap_or("customer")),
            String::new(),
            format!("Your warranty for {product_name} has been registered."),
            String::new(),
        ];

        for (label, value) in [
            ("IMEI", details.imei.as_deref()),
            ("Colour", details.color.as_deref()),
            ("Storage", details.storage.as_deref()),
        ] {
            if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
                lines.push(format!("{label}: {value}"));
            }
        }

        lines.push(format!("Warranty start: {}", terms.warranty_start));
        lines.push(match terms.warranty_end {
            Some(end) => format!("Warranty end: {end}"),
            None => "Warranty end: no fixed end date".to_string(),
        });
        lines.push(format!("Status: {}", terms.warranty_status));
        lines.push(String::new());
        lines.push(format!("Registered by {acting_user}."));

        Some(Self {
            to,
            subject: format!("Warranty registered by {acting_user}"),
            body: lines.join("\n"),
        })
    }
}
