//! Progressive tax computation.
//!
//! The engine selects the active bracket for a net income and applies the
//! marginal rate to the slice of income inside that bracket:
//!
//! ```text
//! tax = (net_income - floor) * rate_percent / 100 + cumulative_tax_below
//! ```
//!
//! # Bracket selection
//!
//! The selected bracket is the **last** bracket whose floor is strictly below
//! the net income. Income exactly at a floor stays in the lower bracket, and
//! any net income at or below zero resolves to the first bracket.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxEngine;
//!
//! let engine = TaxEngine::standard();
//! let result = engine.assess(dec!(360000), dec!(160000));
//!
//! assert_eq!(result.net_income, dec!(200000));
//! assert_eq!(result.bracket.rate_percent, dec!(5));
//! assert_eq!(result.total_tax, dec!(2500));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::brackets::{BracketTableError, TAX_BRACKETS, validate_brackets};
use crate::{TaxBracket, TaxResult};

/// Calculator over a validated bracket table.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    tax_brackets: &'a [TaxBracket],
}

impl TaxEngine<'static> {
    /// Creates an engine over the built-in schedule.
    pub fn standard() -> Self {
        Self {
            tax_brackets: &TAX_BRACKETS,
        }
    }
}

impl Default for TaxEngine<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> TaxEngine<'a> {
    /// Creates an engine over a caller-supplied schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the table fails [`validate_brackets`].
    pub fn new(tax_brackets: &'a [TaxBracket]) -> Result<Self, BracketTableError> {
        validate_brackets(tax_brackets)?;
        Ok(Self { tax_brackets })
    }

    /// The schedule this engine computes against.
    pub fn brackets(&self) -> &'a [TaxBracket] {
        self.tax_brackets
    }

    /// Computes tax for the difference between total income and deductions.
    pub fn assess(
        &self,
        total_income: Decimal,
        total_deductions: Decimal,
    ) -> TaxResult {
        self.compute_tax(total_income.saturating_sub(total_deductions))
    }

    /// Computes tax due on `net_income`.
    pub fn compute_tax(
        &self,
        net_income: Decimal,
    ) -> TaxResult {
        let (bracket_index, bracket) = self.select_bracket(net_income);

        let marginal_income = net_income.saturating_sub(bracket.income_floor);
        let total_tax = marginal_income
            .saturating_mul(bracket.rate_fraction())
            .saturating_add(bracket.cumulative_tax_below);

        trace!(%net_income, bracket_index, %total_tax, "computed tax");

        TaxResult {
            net_income,
            bracket_index,
            bracket,
            total_tax,
        }
    }

    /// Finds the bracket that taxes `net_income`.
    ///
    /// Starts at the first bracket and moves to each later bracket whose
    /// floor is strictly less than `net_income`. A net income equal to a
    /// floor is taxed in the bracket below it.
    pub fn select_bracket(
        &self,
        net_income: Decimal,
    ) -> (usize, TaxBracket) {
        let mut selected = 0;
        for (index, bracket) in self.tax_brackets.iter().enumerate().skip(1) {
            if net_income > bracket.income_floor {
                selected = index;
            }
        }
        (selected, self.tax_brackets[selected])
    }
}
