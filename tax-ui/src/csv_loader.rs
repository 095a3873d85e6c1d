//! CSV loader for initial income and expense lines.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). All header
//! names are case-sensitive and must match exactly.
//!
//! | Column        | Required | Type    | Notes                                  |
//! |---------------|----------|---------|----------------------------------------|
//! | `list`        | yes      | string  | `income` or `expense`                  |
//! | `description` | no       | string  | Empty when the column is absent        |
//! | `amount`      | yes      | number  | Non-numeric text becomes `0`           |
//! | `multiplier`  | no       | number  | Defaults to `1` when empty or absent   |
//! | `fixed`       | no       | bool    | `true` / `false`, defaults to `false`  |
//!
//! ### Example
//!
//! ```csv
//! list,description,amount,multiplier,fixed
//! income,Monthly salary,30000,12,
//! income,Freelance,"45,000",,
//! expense,Personal allowance,60000,1,true
//! expense,Employment expenses,100000,1,false
//! ```
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{ItemList, NewLineItem, coerce_number};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    list: String,
    #[serde(default)]
    description: Option<String>,
    amount: String,
    #[serde(default)]
    multiplier: Option<String>,
    #[serde(default)]
    fixed: Option<bool>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `list` cell named neither income nor expenses. `row` is 1-based
    /// (header = row 0).
    #[error("unrecognised list '{value}' on row {row}")]
    InvalidList { value: String, row: usize },
}

/// Items read from a CSV file, split by list and kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedItems {
    pub income: Vec<NewLineItem>,
    pub expenses: Vec<NewLineItem>,
}

impl ImportedItems {
    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into its target list and item.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<(ItemList, NewLineItem), CsvLoadError> {
    let list = ItemList::parse(&row.list).ok_or_else(|| CsvLoadError::InvalidList {
        value: row.list.clone(),
        row: row_number,
    })?;

    let multiplier = match row.multiplier.as_deref().map(str::trim) {
        None | Some("") => Decimal::ONE,
        Some(text) => coerce_number(text),
    };

    let mut item = NewLineItem::new(
        row.description.unwrap_or_default(),
        coerce_number(&row.amount),
        multiplier,
    );
    item.fixed = row.fixed.unwrap_or(false);

    Ok((list, item))
}

/// Parse CSV text (the full file contents as a &str). Rows are returned in
/// file order within each list.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required column is missing.
/// * [CsvLoadError::InvalidList] – if any row names an unknown list.
pub fn load_from_str(input: &str) -> Result<ImportedItems, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    let mut imported = ImportedItems::default();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let (list, item) = convert_row(result?, idx + 1)?;
        match list {
            ItemList::Income => imported.income.push(item),
            ItemList::Expenses => imported.expenses.push(item),
        }
    }
    Ok(imported)
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
///
/// # Errors
///
/// Returns [CsvLoadError::Io] when the file cannot be read, or another
/// [CsvLoadError] when the contents are invalid.
pub fn load_from_file(path: &Path) -> Result<ImportedItems, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
