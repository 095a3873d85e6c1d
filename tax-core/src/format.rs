//! Display formatting for amounts and rates.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Largest fraction-digit count a `Decimal` can carry.
pub const MAX_PRECISION: u32 = 28;

/// Formats `value` with comma thousands separators and exactly `precision`
/// fraction digits.
///
/// Rounds half away from zero. A value that rounds to zero is printed
/// without a sign. `precision` is clamped to [`MAX_PRECISION`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format_number;
///
/// assert_eq!(format_number(dec!(1615000), 2), "1,615,000.00");
/// assert_eq!(format_number(dec!(150001), 0), "150,001");
/// assert_eq!(format_number(dec!(-160000), 2), "-160,000.00");
/// assert_eq!(format_number(dec!(0.694444), 2), "0.69");
/// ```
pub fn format_number(
    value: Decimal,
    precision: u32,
) -> String {
    let precision = precision.min(MAX_PRECISION);
    let rounded = round_half_up(value, precision);
    let digits = format!("{:.*}", precision as usize, rounded.abs());
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
