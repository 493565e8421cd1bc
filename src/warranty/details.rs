//! Warranty Details

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters that would turn an address into a display name, group or list.
const ADDRESS_SPECIALS: &[char] = &['<', '>', '(', ')', '[', ']', '\\', ',', ';', ':', '"'];

/// Customer and device details attached to a warranty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarrantyDetails {
    /// Customer full name.
    pub customer_name: Option<String>,

    /// Address the warranty confirmation is sent to.
    pub customer_email: Option<String>,

    /// Customer contact number.
    pub customer_phone: Option<String>,

    /// Device IMEI.
    pub imei: Option<String>,

    /// Device colour.
    pub color: Option<String>,

    /// Device storage capacity, e.g. `128GB`.
    pub storage: Option<String>,
}

impl WarrantyDetails {
    /// The customer email, if one was given and is a single well-formed address.
    #[must_use]
    pub fn customer_email(&self) -> Option<&str> {
        non_blank(self.customer_email.as_deref()).and_then(|value| parse_email(value).ok())
    }

    /// The customer name, if one was given and is not blank.
    #[must_use]
    pub fn customer_name(&self) -> Option<&str> {
        non_blank(self.customer_name.as_deref())
    }
}

/// A customer email that is not one bare `local@domain` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a single email address")]
pub struct InvalidEmailError;

/// Accept exactly one bare `local@domain` address, trimmed.
///
/// Display names, address lists, whitespace and control characters are rejected, so the result
/// is safe to place in a mail header.
///
/// # Errors
///
/// Returns [`InvalidEmailError`] for anything other than a single bare address.
pub fn parse_email(value: &str) -> Result<&str, InvalidEmailError> {
    let value = value.trim();

    let (local, domain) = value.split_once('@').ok_or(InvalidEmailError)?;

    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && value
            .chars()
            .all(|c| !c.is_control() && !c.is_whitespace() && !ADDRESS_SPECIALS.contains(&c));

    if well_formed {
        Ok(value)
    } else {
        Err(InvalidEmailError)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unknown_keys_are_ignored() -> TestResult {
        let details: WarrantyDetails = serde_json::from_value(json!({
            "customer_email": "ada@example.com",
            "imei": "356938035643809",
            "notes": "scratched screen",
        }))?;

        assert_eq!(details.customer_email(), Some("ada@example.com"));
        assert_eq!(details.imei.as_deref(), Some("356938035643809"));
        assert_eq!(details.color, None);

        Ok(())
    }

    #[test]
    fn email_with_line_breaks_counts_as_missing() {
        let details = WarrantyDetails {
            customer_email: Some("ada@example.com\r\nBcc: victim@evil.test".to_string()),
            ..WarrantyDetails::default()
        };

        assert_eq!(details.customer_email(), None);
    }

    #[test]
    fn only_bare_addresses_parse() {
        assert_eq!(parse_email("  ada@example.com "), Ok("ada@example.com"));
        assert_eq!(
            parse_email("ada.lovelace+shop@mail.example.co.uk"),
            Ok("ada.lovelace+shop@mail.example.co.uk")
        );

        for rejected in [
            "ada",
            "@example.com",
            "ada@",
            "ada@@example.com",
            "ada@example.com.",
            "Ada <ada@example.com>",
            "ada@example.com, bob@example.com",
            "ada@example.com\nBcc: bob@example.com",
            "ada @example.com",
        ] {
            assert_eq!(parse_email(rejected), Err(InvalidEmailError), "{rejected:?}");
        }
    }

    #[test]
    fn blank_email_counts_as_missing() {
        let details = WarrantyDetails {
            customer_email: Some("   ".to_string()),
            ..WarrantyDetails::default()
        };

        assert_eq!(details.customer_email(), None);
    }
}
