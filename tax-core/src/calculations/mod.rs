//! Tax calculation modules.
//!
//! Leaves first: the bracket schedule, list aggregation, the progressive
//! tax engine and the per-bracket display breakdown.

pub mod aggregate;
pub mod brackets;
pub mod breakdown;
pub mod common;
pub mod engine;

pub use aggregate::sum_items;
pub use brackets::{BracketTableError, TAX_BRACKETS, validate_brackets};
pub use breakdown::breakdown;
pub use engine::TaxEngine;
