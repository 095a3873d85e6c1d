//! Per-bracket breakdown rows for display.
//!
//! Each row shows the tax attributable to its bracket, computed on its own:
//! `min(total_tax - cumulative_tax_below, bracket_cap)`. Rows are not a
//! partition of the total, so they need not add back up to it. The
//! authoritative figure is always [`TaxResult::total_tax`].

use crate::calculations::common::min_capped;
use crate::{BreakdownRow, TaxBracket, TaxResult};

/// Builds one display row per bracket for an engine result.
///
/// A row's tax is filled in only when `net_income >= income_floor`;
/// otherwise it is `None` and renders blank. Rows are highlighted when
/// `net_income > income_floor`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::{TaxEngine, breakdown};
///
/// let engine = TaxEngine::standard();
/// let result = engine.compute_tax(dec!(200000));
/// let rows = breakdown(engine.brackets(), &result);
///
/// assert_eq!(rows[0].tax, Some(dec!(0)));
/// assert_eq!(rows[1].tax, Some(dec!(2500)));
/// assert_eq!(rows[2].tax, None);
/// ```
pub fn breakdown(
    brackets: &[TaxBracket],
    result: &TaxResult,
) -> Vec<BreakdownRow> {
    brackets
        .iter()
        .map(|bracket| breakdown_row(bracket, result))
        .collect()
}

fn breakdown_row(
    bracket: &TaxBracket,
    result: &TaxResult,
) -> BreakdownRow {
    let net_income = result.net_income;
    let tax = (net_income >= bracket.income_floor).then(|| {
        min_capped(
            result.total_tax.saturating_sub(bracket.cumulative_tax_below),
            bracket.bracket_cap,
        )
    });

    BreakdownRow {
        bracket: *bracket,
        highlighted: net_income > bracket.income_floor,
        tax,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::TaxEngine;

    fn rows_for(net_income: Decimal) -> Vec<BreakdownRow> {
        let engine = TaxEngine::standard();
        let result = engine.compute_tax(net_income);
        breakdown(engine.brackets(), &result)
    }

    fn taxes(rows: &[BreakdownRow]) -> Vec<Option<Decimal>> {
        rows.iter().map(|row| row.tax).collect()
    }

    #[test]
    fn breakdown_has_one_row_per_bracket() {
        assert_eq!(rows_for(dec!(200000)).len(), 8);
    }

    #[test]
    fn breakdown_second_bracket_income() {
        let rows = rows_for(dec!(200000));

        assert_eq!(
            taxes(&rows),
            vec![
                Some(dec!(0)),
                Some(dec!(2500)),
                None,
                None,
                None,
                None,
                None,
                None
            ]
        );
    }

    #[test]
    fn breakdown_clips_each_row_to_its_cap() {
        let rows = rows_for(dec!(6000000));

        assert_eq!(
            taxes(&rows),
            vec![
                Some(dec!(0)),
                Some(dec!(7500)),
                Some(dec!(20000)),
                Some(dec!(37500)),
                Some(dec!(50000)),
                Some(dec!(250000)),
                Some(dec!(900000)),
                Some(dec!(350000)),
            ]
        );
    }

    #[test]
    fn breakdown_zero_income_shows_only_first_row() {
        let rows = rows_for(dec!(0));

        assert_eq!(rows[0].tax, Some(dec!(0)));
        assert!(rows[1..].iter().all(|row| row.tax.is_none()));
        assert!(rows.iter().all(|row| !row.highlighted));
    }

    #[test]
    fn breakdown_negative_income_shows_blank_rows() {
        let rows = rows_for(dec!(-1000));

        assert!(rows.iter().all(|row| row.tax.is_none()));
    }

    #[test]
    fn breakdown_income_at_floor_shows_row_without_highlight() {
        let rows = rows_for(dec!(1000000));

        // Income equal to the 25% floor fills that row but does not highlight it.
        assert_eq!(rows[5].tax, Some(dec!(0)));
        assert!(!rows[5].highlighted);
        assert!(rows[4].highlighted);
        assert_eq!(rows[4].tax, Some(dec!(50000)));
        assert_eq!(rows[6].tax, None);
    }

    #[test]
    fn breakdown_highlights_rows_below_income() {
        let rows = rows_for(dec!(600000));
        let highlighted: Vec<bool> = rows.iter().map(|row| row.highlighted).collect();

        assert_eq!(
            highlighted,
            vec![true, true, true, true, false, false, false, false]
        );
    }

    #[test]
    fn breakdown_rows_are_independent_of_the_total() {
        let rows = rows_for(dec!(600000));

        // Tax = (600000 - 500000) * 0.15 + 27500 = 42500
        // The 0% row is clipped to its zero cap, the 5% and 10% rows to theirs.
        assert_eq!(rows[0].tax, Some(dec!(0)));
        assert_eq!(rows[1].tax, Some(dec!(7500)));
        assert_eq!(rows[2].tax, Some(dec!(20000)));
        assert_eq!(rows[3].tax, Some(dec!(15000)));
    }
}
