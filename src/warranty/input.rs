//! Warranty Input

use std::fmt;

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use serde::{
    Deserialize, Deserializer,
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
};
use thiserror::Error;

/// Calculator input, constructed per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct WarrantyInput {
    /// Warranty start date; defaults to the day of calculation.
    #[serde(default)]
    pub warranty_start: Option<Date>,

    /// Duration in calendar months; absent and non-numeric values count as zero.
    #[serde(default, deserialize_with = "lenient_months")]
    pub warranty_months: Option<i64>,
}

impl WarrantyInput {
    /// Input with an explicit start date and duration.
    #[must_use]
    pub const fn new(warranty_start: Date, warranty_months: i64) -> Self {
        Self {
            warranty_start: Some(warranty_start),
            warranty_months: Some(warranty_months),
        }
    }

    /// Duration in months, with absence coerced to zero.
    #[must_use]
    pub fn months(&self) -> i64 {
        self.warranty_months.unwrap_or_default()
    }
}

/// Error returned when a warranty start value is not a recognisable date.
#[derive(Debug, Error)]
#[error("invalid warranty start date {value:?}")]
pub struct WarrantyStartParseError {
    value: String,

    #[source]
    source: jiff::Error,
}

/// Parse a warranty start value.
///
/// Accepts an ISO calendar date (`2025-01-01`), a civil datetime (`2025-01-01T09:30:00`) or an
/// RFC 3339 timestamp. Times are dropped; timestamps are read in UTC.
///
/// # Errors
///
/// Returns [`WarrantyStartParseError`] if none of the accepted forms match.
pub fn parse_warranty_start(value: &str) -> Result<Date, WarrantyStartParseError> {
    let value = value.trim();

    value
        .parse::<Date>()
        .or_else(|_| value.parse::<DateTime>().map(|datetime| datetime.date()))
        .or_else(|_| {
            value
                .parse::<Timestamp>()
                .map(|timestamp| timestamp.to_zoned(TimeZone::UTC).date())
        })
        .map_err(|source| WarrantyStartParseError {
            value: value.to_string(),
            source,
        })
}

/// Deserialize a month count the way form input is coerced.
///
/// Integers pass through, floats truncate toward zero and strings contribute their leading
/// integer (`"12"`, `" 6 months"`). Anything else, including non-numeric strings and booleans,
/// becomes zero. `null` and a missing field stay absent.
///
/// # Errors
///
/// Only propagates errors raised by the underlying deserializer.
pub fn lenient_months<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(MonthsVisitor)
}

struct MonthsVisitor;

impl<'de> Visitor<'de> for MonthsVisitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number of months")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(Some(0))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(i64::try_from(value).unwrap_or(i64::MAX)))
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "truncation toward zero is the coercion rule; `as` saturates out-of-range values"
    )]
    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if value.is_finite() {
            Ok(Some(value.trunc() as i64))
        } else {
            Ok(Some(0))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(leading_integer(value)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok(Some(0))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}

        Ok(Some(0))
    }
}

fn leading_integer(value: &str) -> i64 {
    let value = value.trim_start();

    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit))
        });

    if negative { -magnitude } else { magnitude }
}
