use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive tax schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Marginal rate in percent (e.g. `5` for 5%).
    pub rate_percent: Decimal,
    /// Lower bound of net income for this bracket.
    pub income_floor: Decimal,
    /// Upper bound shown in the breakdown table; `None` for the top bracket.
    pub income_ceiling: Option<Decimal>,
    /// Total tax owed on all income up to `income_floor`.
    pub cumulative_tax_below: Decimal,
    /// Maximum tax payable within this bracket alone; `None` means unbounded.
    pub bracket_cap: Option<Decimal>,
}

impl TaxBracket {
    /// Marginal rate as a fraction (`rate_percent / 100`).
    pub fn rate_fraction(&self) -> Decimal {
        self.rate_percent / Decimal::ONE_HUNDRED
    }

    /// Returns `true` if this bracket has no upper bound.
    pub fn is_top(&self) -> bool {
        self.income_ceiling.is_none()
    }
}
