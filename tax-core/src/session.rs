//! Calculator session: the two item lists plus their derived summary.
//!
//! All edits go through [`CalculatorSession`], which refreshes the summary
//! after each one. The summary is memoized on the revisions of both stores,
//! so reading it never observes a half-applied edit and repeated reads do not
//! recompute.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use crate::calculations::{TaxEngine, breakdown, sum_items};
use crate::{BreakdownRow, ItemField, ItemId, ItemStore, LineItem, NewLineItem, TaxResult};

/// Which list an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemList {
    Income,
    Expenses,
}

impl ItemList {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expenses => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" | "inc" => Some(Self::Income),
            "expense" | "expenses" | "exp" | "deduction" => Some(Self::Expenses),
            _ => None,
        }
    }
}

/// Every figure derived from the current item lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxSummary {
    pub total_income: Decimal,
    pub total_deductions: Decimal,
    /// `total_income - total_deductions`; may be negative.
    pub net_income: Decimal,
    pub tax: TaxResult,
    /// Rate of the selected bracket, or 0 when there is no income.
    pub marginal_rate: Decimal,
    /// Tax as a percentage of total income, or 0 when there is no income.
    pub effective_rate: Decimal,
    pub breakdown: Vec<BreakdownRow>,
}

impl TaxSummary {
    /// Derives the summary for two item lists.
    pub fn compute(
        engine: &TaxEngine<'_>,
        income: &[LineItem],
        expenses: &[LineItem],
    ) -> Self {
        let total_income = sum_items(income);
        let total_deductions = sum_items(expenses);
        let tax = engine.assess(total_income, total_deductions);

        let (marginal_rate, effective_rate) = if total_income > Decimal::ZERO {
            let effective = tax
                .total_tax
                .checked_div(total_income)
                .map_or(Decimal::ZERO, |share| share.saturating_mul(Decimal::ONE_HUNDRED));
            (tax.bracket.rate_percent, effective)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Self {
            total_income,
            total_deductions,
            net_income: tax.net_income,
            tax,
            marginal_rate,
            effective_rate,
            breakdown: breakdown(engine.brackets(), &tax),
        }
    }

    /// Authoritative tax due.
    pub fn total_tax(&self) -> Decimal {
        self.tax.total_tax
    }
}

/// Income and expense lists with a memoized [`TaxSummary`].
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    engine: TaxEngine<'static>,
    income: ItemStore,
    expenses: ItemStore,
    summary: TaxSummary,
    summary_key: (u64, u64),
}

impl Default for CalculatorSession {
    /// A session seeded with a monthly salary and the standard deductions.
    fn default() -> Self {
        Self::new(default_income(), default_expenses())
    }
}

impl CalculatorSession {
    /// Creates a session over the built-in schedule.
    ///
    /// An empty seed list starts that side with one blank item.
    pub fn new(
        income: impl IntoIterator<Item = NewLineItem>,
        expenses: impl IntoIterator<Item = NewLineItem>,
    ) -> Self {
        Self::with_engine(TaxEngine::standard(), income, expenses)
    }

    /// Creates a session over a specific engine.
    pub fn with_engine(
        engine: TaxEngine<'static>,
        income: impl IntoIterator<Item = NewLineItem>,
        expenses: impl IntoIterator<Item = NewLineItem>,
    ) -> Self {
        let income = ItemStore::with_items(income);
        let expenses = ItemStore::with_items(expenses);
        let summary = TaxSummary::compute(&engine, income.items(), expenses.items());
        let summary_key = (income.revision(), expenses.revision());
        Self {
            engine,
            income,
            expenses,
            summary,
            summary_key,
        }
    }

    pub fn engine(&self) -> &TaxEngine<'static> {
        &self.engine
    }

    /// Read access to one list.
    pub fn store(
        &self,
        list: ItemList,
    ) -> &ItemStore {
        match list {
            ItemList::Income => &self.income,
            ItemList::Expenses => &self.expenses,
        }
    }

    pub fn income(&self) -> &ItemStore {
        &self.income
    }

    pub fn expenses(&self) -> &ItemStore {
        &self.expenses
    }

    /// The summary for the current lists.
    pub fn summary(&self) -> &TaxSummary {
        &self.summary
    }

    /// Appends a blank item to `list`.
    pub fn add(
        &mut self,
        list: ItemList,
    ) -> ItemId {
        let id = self.store_mut(list).add();
        self.refresh();
        id
    }

    /// Updates one field of an item; see [`ItemStore::update`].
    pub fn update(
        &mut self,
        list: ItemList,
        id: ItemId,
        field: ItemField,
        value: &str,
    ) -> bool {
        let updated = self.store_mut(list).update(id, field, value);
        self.refresh();
        updated
    }

    /// Removes an item unless it is the last one in `list`.
    pub fn remove(
        &mut self,
        list: ItemList,
        id: ItemId,
    ) -> bool {
        let removed = self.store_mut(list).remove(id);
        self.refresh();
        removed
    }

    fn store_mut(
        &mut self,
        list: ItemList,
    ) -> &mut ItemStore {
        match list {
            ItemList::Income => &mut self.income,
            ItemList::Expenses => &mut self.expenses,
        }
    }

    fn refresh(&mut self) {
        let key = (self.income.revision(), self.expenses.revision());
        if key == self.summary_key {
            return;
        }
        self.summary =
            TaxSummary::compute(&self.engine, self.income.items(), self.expenses.items());
        self.summary_key = key;
        debug!(
            net_income = %self.summary.net_income,
            total_tax = %self.summary.total_tax(),
            "recomputed summary"
        );
    }
}

/// Income seeded into a new session: a monthly salary over twelve months.
pub fn default_income() -> Vec<NewLineItem> {
    vec![NewLineItem::new("Annual salary", dec!(30000), dec!(12))]
}

/// Deductions seeded into a new session: the fixed personal allowance and
/// the employment expense deduction.
pub fn default_expenses() -> Vec<NewLineItem> {
    vec![
        NewLineItem::new("Personal allowance (60,000)", dec!(60000), dec!(1)).fixed(),
        NewLineItem::new(
            "Employment expenses (50% of salary, max 100,000)",
            dec!(100000),
            dec!(1),
        ),
    ]
}
