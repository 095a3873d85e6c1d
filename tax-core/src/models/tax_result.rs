use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;

/// Outcome of running the tax engine over a net income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Total income minus total deductions; may be negative.
    pub net_income: Decimal,
    /// Position of the selected bracket in the table.
    pub bracket_index: usize,
    /// Copy of the selected bracket.
    pub bracket: TaxBracket,
    /// Authoritative tax due.
    pub total_tax: Decimal,
}

/// One display row of the per-bracket breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub bracket: TaxBracket,
    /// `net_income > income_floor`; the row is drawn highlighted.
    pub highlighted: bool,
    /// Tax attributed to this bracket; `None` renders as a blank cell.
    pub tax: Option<Decimal>,
}
