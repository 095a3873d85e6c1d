//! Lenient numeric coercion for field input.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserializer;
use serde::de::{self, Visitor};
use tracing::warn;

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Coerces field text into a [`Decimal`], never failing.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and scientific
/// notation (e.g. `"1e3"`). Empty or whitespace-only input is 0. Input that
/// is not a finite number (`"abc"`, `"1_000"`, `"NaN"`, `"Infinity"`,
/// overflow) is also 0, with a warning logged.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::coerce_number;
///
/// assert_eq!(coerce_number("1,234.56"), dec!(1234.56));
/// assert_eq!(coerce_number("2.5e2"), dec!(250));
/// assert_eq!(coerce_number(""), dec!(0));
/// assert_eq!(coerce_number("thirty"), dec!(0));
/// ```
pub fn coerce_number(s: &str) -> Decimal {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    // rust_decimal accepts digit separators we do not.
    if normalized.contains('_') {
        warn!(input = %s, "non-numeric input treated as 0: underscore in number");
        return Decimal::ZERO;
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or_else(|e| {
            warn!(input = %s, "non-numeric input treated as 0: {}", e);
            Decimal::ZERO
        })
}

/// Serde adapter that reads a number or a string through [`coerce_number`].
///
/// Use with `#[serde(deserialize_with = "...")]` so file input follows the
/// same rules as typed input instead of rejecting the whole document.
pub fn deserialize_coerced<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CoercedVisitor)
}

struct CoercedVisitor;

impl Visitor<'_> for CoercedVisitor {
    type Value = Decimal;

    fn expecting(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("a number or numeric text")
    }

    fn visit_i64<E: de::Error>(
        self,
        v: i64,
    ) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(
        self,
        v: u64,
    ) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(
        self,
        v: f64,
    ) -> Result<Decimal, E> {
        Ok(coerce_number(&v.to_string()))
    }

    fn visit_str<E: de::Error>(
        self,
        v: &str,
    ) -> Result<Decimal, E> {
        Ok(coerce_number(v))
    }
}
