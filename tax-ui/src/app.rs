//! The interactive calculator loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tax_core::{CalculatorSession, ItemList};
use tracing::{debug, info, warn};

use crate::commands::{Command, HELP, parse_line};
use crate::config::AppConfig;
use crate::csv_loader::ImportedItems;
use crate::logging;
use crate::render::Renderer;

/// Whether the loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Builds the starting session. Imported items replace the configured seeds
/// of the lists they target.
pub fn seed_session(
    config: &AppConfig,
    imported: ImportedItems,
) -> CalculatorSession {
    let ImportedItems { income, expenses } = imported;
    let income = if income.is_empty() {
        config.income.clone()
    } else {
        income
    };
    let expenses = if expenses.is_empty() {
        config.expenses.clone()
    } else {
        expenses
    };
    CalculatorSession::new(income, expenses)
}

/// A session plus the renderer used to print it.
#[derive(Debug, Clone)]
pub struct Calculator {
    session: CalculatorSession,
    renderer: Renderer,
}

impl Calculator {
    pub fn new(
        session: CalculatorSession,
        renderer: Renderer,
    ) -> Self {
        Self { session, renderer }
    }

    pub fn from_config(
        config: &AppConfig,
        imported: ImportedItems,
    ) -> Self {
        Self::new(seed_session(config, imported), Renderer::from_config(config))
    }

    pub fn session(&self) -> &CalculatorSession {
        &self.session
    }

    /// Prints both lists, the summary and the bracket table.
    pub fn render(
        &self,
        out: &mut impl Write,
    ) -> Result<()> {
        let summary = self.session.summary();
        self.renderer.write_items(
            out,
            "Income",
            "Total income",
            self.session.store(ItemList::Income),
            summary.total_income,
        )?;
        writeln!(out)?;
        self.renderer.write_items(
            out,
            "Expenses/deductions (* fixed)",
            "Total expenses/deductions",
            self.session.store(ItemList::Expenses),
            summary.total_deductions,
        )?;
        writeln!(out)?;
        self.renderer.write_summary(out, summary)?;
        writeln!(out)?;
        self.renderer.write_breakdown(out, summary)?;
        Ok(())
    }

    /// Applies one command and prints its result.
    pub fn execute(
        &mut self,
        command: Command,
        out: &mut impl Write,
    ) -> Result<Flow> {
        debug!(?command, "executing");
        let mutation = command.is_mutation();
        match command {
            Command::Show => {}
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::LogLevel(level) => {
                match logging::set_log_level(&level) {
                    Ok(()) => writeln!(out, "log level set to '{level}'")?,
                    Err(e) => writeln!(out, "{e}")?,
                }
                return Ok(Flow::Continue);
            }
            Command::Add(list) => {
                let id = self.session.add(list);
                writeln!(out, "added {} item {id}", list.as_str())?;
            }
            Command::Set {
                list,
                id,
                field,
                value,
            } => {
                if !self.session.update(list, id, field, &value) {
                    writeln!(out, "no {} item with id {id}", list.as_str())?;
                    return Ok(Flow::Continue);
                }
            }
            Command::Remove { list, id } => {
                if !self.session.remove(list, id) {
                    writeln!(
                        out,
                        "cannot remove {} item {id}: not found, or it is the last one",
                        list.as_str()
                    )?;
                    return Ok(Flow::Continue);
                }
            }
        }
        if mutation {
            writeln!(out)?;
        }
        self.render(out)?;
        Ok(Flow::Continue)
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Unparseable lines print an error and the help hint; they never end
    /// the loop.
    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
    ) -> Result<()> {
        info!("calculator session started");
        self.render(out)?;
        writeln!(out, "\nType 'help' for commands.")?;
        out.flush()?;

        for line in input.lines() {
            let line = line.context("failed to read command")?;
            let flow = match parse_line(&line) {
                Ok(Some(command)) => self.execute(command, out)?,
                Ok(None) => Flow::Continue,
                Err(e) => {
                    warn!(input = %line, "rejected command: {e}");
                    writeln!(out, "{e}. Type 'help' for commands.")?;
                    Flow::Continue
                }
            };
            out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }
        info!("calculator session ended");
        Ok(())
    }
}
