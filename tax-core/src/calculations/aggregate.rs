//! Summing line items into list totals.

use rust_decimal::Decimal;

use crate::LineItem;

/// Sums `amount × multiplier` over `items`.
///
/// A zero multiplier zeroes its line. Nothing is rounded, and the running
/// total saturates at the `Decimal` bounds rather than overflowing.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::sum_items;
/// use tax_core::{ItemStore, NewLineItem};
///
/// let store = ItemStore::with_items([
///     NewLineItem::new("salary", dec!(30000), dec!(12)),
///     NewLineItem::new("bonus", dec!(50000), dec!(1)),
/// ]);
///
/// assert_eq!(sum_items(store.items()), dec!(410000));
/// ```
pub fn sum_items(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |total, item| total.saturating_add(item.contribution()))
}
