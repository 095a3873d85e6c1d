//! Progressive personal income tax engine.
//!
//! Income and expense lines live in two [`ItemStore`]s; their totals feed the
//! [`TaxEngine`](calculations::TaxEngine), which picks the active bracket of
//! the built-in schedule and computes the tax due. [`CalculatorSession`] ties
//! the pieces together and keeps a memoized [`TaxSummary`] in step with
//! every edit.

pub mod calculations;
pub mod format;
pub mod input;
pub mod models;
pub mod session;
pub mod store;

pub use format::{MAX_PRECISION, format_number};
pub use input::coerce_number;
pub use models::*;
pub use session::{CalculatorSession, ItemList, TaxSummary};
pub use store::ItemStore;
