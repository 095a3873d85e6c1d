//! The progressive tax schedule and its consistency rules.
//!
//! # Schedule
//!
//! | Rate | Net income             | Cumulative tax below | Bracket cap |
//! |------|------------------------|----------------------|-------------|
//! | 0%   | 0 - 150,000            | 0                    | 0           |
//! | 5%   | 150,001 - 300,000      | 0                    | 7,500       |
//! | 10%  | 300,001 - 500,000      | 7,500                | 20,000      |
//! | 15%  | 500,001 - 750,000      | 27,500               | 37,500      |
//! | 20%  | 750,001 - 1,000,000    | 65,000               | 50,000      |
//! | 25%  | 1,000,001 - 2,000,000  | 115,000              | 250,000     |
//! | 30%  | 2,000,001 - 5,000,000  | 365,000              | 900,000     |
//! | 35%  | 5,000,001 and above    | 1,265,000            | unbounded   |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::TaxBracket;

/// The personal income tax schedule, ordered by ascending income floor.
pub static TAX_BRACKETS: [TaxBracket; 8] = [
    TaxBracket {
        rate_percent: dec!(0),
        income_floor: dec!(0),
        income_ceiling: Some(dec!(150000)),
        cumulative_tax_below: dec!(0),
        bracket_cap: Some(dec!(0)),
    },
    TaxBracket {
        rate_percent: dec!(5),
        income_floor: dec!(150000),
        income_ceiling: Some(dec!(300000)),
        cumulative_tax_below: dec!(0),
        bracket_cap: Some(dec!(7500)),
    },
    TaxBracket {
        rate_percent: dec!(10),
        income_floor: dec!(300000),
        income_ceiling: Some(dec!(500000)),
        cumulative_tax_below: dec!(7500),
        bracket_cap: Some(dec!(20000)),
    },
    TaxBracket {
        rate_percent: dec!(15),
        income_floor: dec!(500000),
        income_ceiling: Some(dec!(750000)),
        cumulative_tax_below: dec!(27500),
        bracket_cap: Some(dec!(37500)),
    },
    TaxBracket {
        rate_percent: dec!(20),
        income_floor: dec!(750000),
        income_ceiling: Some(dec!(1000000)),
        cumulative_tax_below: dec!(65000),
        bracket_cap: Some(dec!(50000)),
    },
    TaxBracket {
        rate_percent: dec!(25),
        income_floor: dec!(1000000),
        income_ceiling: Some(dec!(2000000)),
        cumulative_tax_below: dec!(115000),
        bracket_cap: Some(dec!(250000)),
    },
    TaxBracket {
        rate_percent: dec!(30),
        income_floor: dec!(2000000),
        income_ceiling: Some(dec!(5000000)),
        cumulative_tax_below: dec!(365000),
        bracket_cap: Some(dec!(900000)),
    },
    TaxBracket {
        rate_percent: dec!(35),
        income_floor: dec!(5000000),
        income_ceiling: None,
        cumulative_tax_below: dec!(1265000),
        bracket_cap: None,
    },
];

/// Ways a bracket table can violate the schedule rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// The table has no brackets.
    #[error("no tax brackets provided")]
    Empty,

    /// The lowest bracket must start at zero income.
    #[error("lowest bracket must start at 0, got {0}")]
    FirstFloorNotZero(Decimal),

    /// Income floors must strictly ascend.
    #[error("bracket {index} floor {floor} does not exceed the previous floor")]
    FloorNotAscending { index: usize, floor: Decimal },

    /// A bracket's upper bound must equal the next bracket's floor.
    #[error("bracket {index} ceiling {ceiling:?} does not meet the next floor {next_floor}")]
    CeilingMismatch {
        index: usize,
        ceiling: Option<Decimal>,
        next_floor: Decimal,
    },

    /// Only the last bracket may be unbounded, and it must be.
    #[error("bracket {index} has an unbounded ceiling or cap but is not the top bracket")]
    UnboundedBeforeTop { index: usize },

    /// The top bracket must have neither a ceiling nor a cap.
    #[error("top bracket must be unbounded")]
    BoundedTop,

    /// A bracket's cap disagrees with its width times its rate.
    #[error("bracket {index} cap {actual:?} should be {expected}")]
    CapMismatch {
        index: usize,
        expected: Decimal,
        actual: Option<Decimal>,
    },

    /// A bracket's cumulative tax disagrees with the brackets below it.
    #[error("bracket {index} cumulative tax {actual} should be {expected}")]
    CumulativeMismatch {
        index: usize,
        expected: Decimal,
        actual: Decimal,
    },

    /// A cap or cumulative tax does not fit in a `Decimal`.
    #[error("bracket {index} amounts overflow")]
    Overflow { index: usize },
}

/// Checks that `brackets` forms a consistent progressive schedule.
///
/// # Errors
///
/// Returns [`BracketTableError`] if:
/// - the table is empty
/// - the first floor is not 0
/// - floors do not strictly ascend
/// - any ceiling differs from the next floor, or a non-top bracket is unbounded
/// - the top bracket has a ceiling or a cap
/// - a cap differs from `(next floor - floor) * rate / 100`
/// - a cumulative tax differs from the previous cumulative tax plus the previous cap
/// - a cap or cumulative tax overflows `Decimal`
///
/// # Example
///
/// ```
/// use tax_core::calculations::{TAX_BRACKETS, validate_brackets};
///
/// assert_eq!(validate_brackets(&TAX_BRACKETS), Ok(()));
/// ```
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketTableError> {
    let first = brackets.first().ok_or(BracketTableError::Empty)?;
    if !first.income_floor.is_zero() {
        return Err(BracketTableError::FirstFloorNotZero(first.income_floor));
    }

    for (index, pair) in brackets.windows(2).enumerate() {
        let (lower, upper) = (&pair[0], &pair[1]);

        if upper.income_floor <= lower.income_floor {
            return Err(BracketTableError::FloorNotAscending {
                index: index + 1,
                floor: upper.income_floor,
            });
        }
        if lower.income_ceiling.is_none() || lower.bracket_cap.is_none() {
            return Err(BracketTableError::UnboundedBeforeTop { index });
        }
        if lower.income_ceiling != Some(upper.income_floor) {
            return Err(BracketTableError::CeilingMismatch {
                index,
                ceiling: lower.income_ceiling,
                next_floor: upper.income_floor,
            });
        }

        let full_bracket_tax = upper
            .income_floor
            .checked_sub(lower.income_floor)
            .and_then(|width| width.checked_mul(lower.rate_fraction()))
            .ok_or(BracketTableError::Overflow { index })?;
        if lower.bracket_cap != Some(full_bracket_tax) {
            return Err(BracketTableError::CapMismatch {
                index,
                expected: full_bracket_tax,
                actual: lower.bracket_cap,
            });
        }

        let expected = lower
            .cumulative_tax_below
            .checked_add(full_bracket_tax)
            .ok_or(BracketTableError::Overflow { index: index + 1 })?;
        if upper.cumulative_tax_below != expected {
            return Err(BracketTableError::CumulativeMismatch {
                index: index + 1,
                expected,
                actual: upper.cumulative_tax_below,
            });
        }
    }

    match brackets.last() {
        Some(top) if top.income_ceiling.is_none() && top.bracket_cap.is_none() => Ok(()),
        _ => Err(BracketTableError::BoundedTop),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bracket(
        rate_percent: Decimal,
        income_floor: Decimal,
        income_ceiling: Option<Decimal>,
        cumulative_tax_below: Decimal,
        bracket_cap: Option<Decimal>,
    ) -> TaxBracket {
        TaxBracket {
            rate_percent,
            income_floor,
            income_ceiling,
            cumulative_tax_below,
            bracket_cap,
        }
    }

    fn two_brackets() -> Vec<TaxBracket> {
        vec![
            bracket(dec!(0), dec!(0), Some(dec!(1000)), dec!(0), Some(dec!(0))),
            bracket(dec!(10), dec!(1000), None, dec!(0), None),
        ]
    }

    // =========================================================================
    // seed table tests
    // =========================================================================

    #[test]
    fn seed_table_is_consistent() {
        assert_eq!(validate_brackets(&TAX_BRACKETS), Ok(()));
    }

    #[test]
    fn seed_table_starts_at_zero_rate_and_floor() {
        let first = TAX_BRACKETS[0];

        assert_eq!(first.rate_percent, dec!(0));
        assert_eq!(first.income_floor, dec!(0));
    }

    #[test]
    fn seed_table_top_bracket_is_unbounded() {
        let top = TAX_BRACKETS[TAX_BRACKETS.len() - 1];

        assert!(top.is_top());
        assert_eq!(top.bracket_cap, None);
        assert_eq!(top.rate_percent, dec!(35));
    }

    #[test]
    fn seed_table_only_top_bracket_is_unbounded() {
        let unbounded = TAX_BRACKETS.iter().filter(|b| b.is_top()).count();

        assert_eq!(unbounded, 1);
    }

    // =========================================================================
    // validate_brackets tests
    // =========================================================================

    #[test]
    fn validate_accepts_minimal_table() {
        assert_eq!(validate_brackets(&two_brackets()), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_table() {
        assert_eq!(validate_brackets(&[]), Err(BracketTableError::Empty));
    }

    #[test]
    fn validate_rejects_nonzero_first_floor() {
        let mut brackets = two_brackets();
        brackets[0].income_floor = dec!(100);

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::FirstFloorNotZero(dec!(100)))
        );
    }

    #[test]
    fn validate_rejects_descending_floors() {
        let mut brackets = two_brackets();
        brackets[1].income_floor = dec!(0);

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::FloorNotAscending {
                index: 1,
                floor: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_unbounded_middle_bracket() {
        let mut brackets = two_brackets();
        brackets[0].bracket_cap = None;

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::UnboundedBeforeTop { index: 0 })
        );
    }

    #[test]
    fn validate_rejects_gap_between_ceiling_and_next_floor() {
        let mut brackets = two_brackets();
        brackets[0].income_ceiling = Some(dec!(900));

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::CeilingMismatch {
                index: 0,
                ceiling: Some(dec!(900)),
                next_floor: dec!(1000),
            })
        );
    }

    #[test]
    fn validate_rejects_wrong_cap() {
        let mut brackets = vec![
            bracket(dec!(5), dec!(0), Some(dec!(1000)), dec!(0), Some(dec!(40))),
            bracket(dec!(10), dec!(1000), None, dec!(50), None),
        ];

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::CapMismatch {
                index: 0,
                expected: dec!(50),
                actual: Some(dec!(40)),
            })
        );

        brackets[0].bracket_cap = Some(dec!(50));
        assert_eq!(validate_brackets(&brackets), Ok(()));
    }

    #[test]
    fn validate_rejects_wrong_cumulative_tax() {
        let brackets = vec![
            bracket(dec!(5), dec!(0), Some(dec!(1000)), dec!(0), Some(dec!(50))),
            bracket(dec!(10), dec!(1000), None, dec!(45), None),
        ];

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::CumulativeMismatch {
                index: 1,
                expected: dec!(50),
                actual: dec!(45),
            })
        );
    }

    #[test]
    fn validate_rejects_cap_overflow() {
        let brackets = vec![
            bracket(
                dec!(200),
                dec!(0),
                Some(Decimal::MAX),
                dec!(0),
                Some(Decimal::MAX),
            ),
            bracket(dec!(10), Decimal::MAX, None, Decimal::MAX, None),
        ];

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::Overflow { index: 0 })
        );
    }

    #[test]
    fn validate_rejects_cumulative_overflow() {
        let brackets = vec![
            bracket(
                dec!(10),
                dec!(0),
                Some(dec!(1000)),
                Decimal::MAX,
                Some(dec!(100)),
            ),
            bracket(dec!(20), dec!(1000), None, Decimal::MAX, None),
        ];

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::Overflow { index: 1 })
        );
    }

    #[test]
    fn validate_rejects_bounded_top() {
        let mut brackets = two_brackets();
        brackets[1].bracket_cap = Some(dec!(100));

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::BoundedTop)
        );
    }

    #[test]
    fn validate_rejects_single_bounded_bracket() {
        let brackets = vec![bracket(
            dec!(0),
            dec!(0),
            Some(dec!(1000)),
            dec!(0),
            Some(dec!(0)),
        )];

        assert_eq!(
            validate_brackets(&brackets),
            Err(BracketTableError::BoundedTop)
        );
    }
}
