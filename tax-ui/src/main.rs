use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use tax_ui::csv_loader::{self, ImportedItems};
use tax_ui::{AppConfig, Calculator, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive personal income tax calculator.
///
/// Reads income and expense lines from the config file (and optionally a
/// CSV file), prints the tax summary, then accepts edit commands on stdin.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Config file. Defaults to `tax-calculator.toml` when it exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV file of initial income/expense lines.
    #[arg(long)]
    items: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tax_core=trace`. `RUST_LOG` wins.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the summary once and exit.
    #[arg(long)]
    summary: bool,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(path) = cli.log_file {
        config.log_file = Some(path);
    }

    logging::init_logging(&config.log_level);
    if let Some(path) = &config.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "configuration loaded");

    let imported = match &cli.items {
        Some(path) => csv_loader::load_from_file(path)
            .with_context(|| format!("importing items from {}", path.display()))?,
        None => ImportedItems::default(),
    };
    if !imported.is_empty() {
        info!(count = imported.len(), "imported items");
    }

    let mut calculator = Calculator::from_config(&config, imported);
    let mut stdout = io::stdout().lock();
    if cli.summary {
        return calculator.render(&mut stdout);
    }
    calculator.run(io::stdin().lock(), &mut stdout)
}
