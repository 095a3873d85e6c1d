use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::input::deserialize_coerced;

/// Stable identifier of a [`LineItem`] within its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// The editable fields of a [`LineItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Description,
    Amount,
    Multiplier,
}

impl ItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Multiplier => "multiplier",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "description" | "desc" => Some(Self::Description),
            "amount" => Some(Self::Amount),
            "multiplier" | "mult" | "x" => Some(Self::Multiplier),
            _ => None,
        }
    }
}

/// A single income or expense/deduction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub description: String,
    /// Amount in currency units, full precision.
    pub amount: Decimal,
    /// Quantity; `0` zeroes the line.
    pub multiplier: Decimal,
    /// Marks a standing entry such as the personal allowance.
    /// Display hint only: fixed items can still be removed.
    pub fixed: bool,
}

impl LineItem {
    /// Creates a blank item: empty description, zero amount, multiplier 1.
    pub fn blank(id: ItemId) -> Self {
        Self {
            id,
            description: String::new(),
            amount: Decimal::ZERO,
            multiplier: Decimal::ONE,
            fixed: false,
        }
    }

    /// `amount × multiplier`, saturating instead of overflowing.
    pub fn contribution(&self) -> Decimal {
        self.amount.saturating_mul(self.multiplier)
    }
}

/// Initial values for a [`LineItem`] before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_coerced")]
    pub amount: Decimal,
    #[serde(default = "default_multiplier", deserialize_with = "deserialize_coerced")]
    pub multiplier: Decimal,
    #[serde(default)]
    pub fixed: bool,
}

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

impl NewLineItem {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        multiplier: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            multiplier,
            fixed: false,
        }
    }

    /// Marks the item as a standing entry.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub(crate) fn into_item(
        self,
        id: ItemId,
    ) -> LineItem {
        LineItem {
            id,
            description: self.description,
            amount: self.amount,
            multiplier: self.multiplier,
            fixed: self.fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn blank_item_has_zero_amount_and_unit_multiplier() {
        let item = LineItem::blank(ItemId(7));

        assert_eq!(item.amount, Decimal::ZERO);
        assert_eq!(item.multiplier, Decimal::ONE);
        assert_eq!(item.description, "");
        assert!(!item.fixed);
    }

    #[test]
    fn contribution_multiplies_amount_by_multiplier() {
        let item = NewLineItem::new("salary", dec!(30000), dec!(12)).into_item(ItemId(1));

        assert_eq!(item.contribution(), dec!(360000));
    }

    #[test]
    fn contribution_saturates_on_overflow() {
        let item = NewLineItem::new("huge", Decimal::MAX, dec!(2)).into_item(ItemId(1));

        assert_eq!(item.contribution(), Decimal::MAX);
    }

    #[test]
    fn item_id_displays_and_parses_as_digits() {
        assert_eq!(ItemId(42).to_string(), "42");
        assert_eq!(" 42 ".parse::<ItemId>(), Ok(ItemId(42)));
        assert!("abc".parse::<ItemId>().is_err());
    }

    #[test]
    fn item_field_parse_accepts_aliases() {
        assert_eq!(ItemField::parse("amount"), Some(ItemField::Amount));
        assert_eq!(ItemField::parse("x"), Some(ItemField::Multiplier));
        assert_eq!(ItemField::parse("desc"), Some(ItemField::Description));
        assert_eq!(ItemField::parse("rate"), None);
    }
}
