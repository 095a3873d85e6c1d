mod line_item;
mod tax_bracket;
mod tax_result;

pub use line_item::{ItemField, ItemId, LineItem, NewLineItem};
pub use tax_bracket::TaxBracket;
pub use tax_result::{BreakdownRow, TaxResult};
