//! Plain-text rendering of the item lists and the tax summary.

use std::io::{self, Write};

use rust_decimal::Decimal;
use tax_core::{BreakdownRow, ItemStore, TaxSummary, format_number};

use crate::config::AppConfig;

const LABEL_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 18;

/// Formats amounts with a fixed precision and currency symbol.
#[derive(Debug, Clone)]
pub struct Renderer {
    currency_symbol: String,
    precision: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl Renderer {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            precision: config.precision,
        }
    }

    fn money(
        &self,
        value: Decimal,
    ) -> String {
        format!("{} {}", format_number(value, self.precision), self.currency_symbol)
    }

    fn percent(
        &self,
        value: Decimal,
    ) -> String {
        format!("{}%", format_number(value, self.precision))
    }

    /// Writes one list with its ids, amounts and total.
    pub fn write_items(
        &self,
        out: &mut impl Write,
        title: &str,
        total_label: &str,
        store: &ItemStore,
        total: Decimal,
    ) -> io::Result<()> {
        writeln!(out, "{title}")?;
        for item in store.items() {
            let marker = if item.fixed { '*' } else { ' ' };
            let description = if item.description.is_empty() {
                "(no description)"
            } else {
                item.description.as_str()
            };
            writeln!(
                out,
                "  [{id:>3}]{marker} {description:<width$} {amount:>amount_width$} x {multiplier}",
                id = item.id.0,
                width = LABEL_WIDTH + 12,
                amount = format_number(item.amount, self.precision),
                amount_width = AMOUNT_WIDTH,
                multiplier = item.multiplier.normalize(),
            )?;
        }
        writeln!(
            out,
            "  {total_label:<width$} {total:>amount_width$}",
            width = LABEL_WIDTH + 19,
            total = self.money(total),
            amount_width = AMOUNT_WIDTH + 2,
        )
    }

    /// Writes the totals, tax due and rates.
    pub fn write_summary(
        &self,
        out: &mut impl Write,
        summary: &TaxSummary,
    ) -> io::Result<()> {
        writeln!(out, "Summary")?;
        let lines = [
            ("Total income", self.money(summary.total_income)),
            ("Less expenses/deductions", self.money(-summary.total_deductions)),
            ("Net income", self.money(summary.net_income)),
            ("Tax due", self.money(summary.total_tax())),
            ("Marginal rate", self.percent(summary.marginal_rate)),
            ("Effective rate", self.percent(summary.effective_rate)),
        ];
        for (label, value) in lines {
            writeln!(
                out,
                "  {label:<LABEL_WIDTH$} {value:>width$}",
                width = AMOUNT_WIDTH + 2
            )?;
        }
        Ok(())
    }

    /// Writes the per-bracket table. Highlighted rows are marked with `>`.
    pub fn write_breakdown(
        &self,
        out: &mut impl Write,
        summary: &TaxSummary,
    ) -> io::Result<()> {
        writeln!(out, "Tax by bracket")?;
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>6} {:>AMOUNT_WIDTH$}",
            "Net income", "Rate", "Tax"
        )?;
        for row in &summary.breakdown {
            let marker = if row.highlighted { '>' } else { ' ' };
            writeln!(
                out,
                "{marker} {range:<LABEL_WIDTH$} {rate:>6} {tax:>AMOUNT_WIDTH$}",
                range = bracket_range(row),
                rate = format!("{}%", row.bracket.rate_percent.normalize()),
                tax = row
                    .tax
                    .map(|tax| format_number(tax, self.precision))
                    .unwrap_or_default(),
            )?;
        }
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>6} {:>width$}",
            "Total",
            "",
            self.money(summary.total_tax()),
            width = AMOUNT_WIDTH + 2
        )
    }
}

/// "150,001 - 300,000" or "5,000,001 and above".
fn bracket_range(row: &BreakdownRow) -> String {
    let from = format_number(row.bracket.income_floor.saturating_add(Decimal::ONE), 0);
    match row.bracket.income_ceiling {
        Some(ceiling) => format!("{from} - {}", format_number(ceiling, 0)),
        None => format!("{from} and above"),
    }
}
