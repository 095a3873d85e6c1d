//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used by the engine, the
//! breakdown renderer and the number formatter.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
///
/// Values exactly halfway are rounded away from zero, the same rule the
/// locale number formatters apply.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454), 2), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455), 2), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455), 2), dec!(-123.46)); // Away from zero
/// assert_eq!(round_half_up(dec!(150000.5), 0), dec!(150001));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the smaller of `value` and `cap`, where a `None` cap is unbounded.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::min_capped;
///
/// assert_eq!(min_capped(dec!(9000), Some(dec!(7500))), dec!(7500));
/// assert_eq!(min_capped(dec!(9000), None), dec!(9000));
/// ```
pub fn min_capped(
    value: Decimal,
    cap: Option<Decimal>,
) -> Decimal {
    match cap {
        Some(cap) if cap < value => cap,
        _ => value,
    }
}
