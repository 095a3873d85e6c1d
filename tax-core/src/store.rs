//! Ordered, never-empty lists of line items.
//!
//! An [`ItemStore`] backs one side of the calculator (income or
//! expenses/deductions). It only supports three transitions:
//!
//! - [`ItemStore::add`] appends a blank item with a fresh id.
//! - [`ItemStore::update`] replaces one field of the item with a given id.
//! - [`ItemStore::remove`] deletes an item unless it is the last one left.
//!
//! Ids come from a per-store counter and are never reused.

use tracing::debug;

use crate::input::coerce_number;
use crate::{ItemField, ItemId, LineItem, NewLineItem};

/// Hands out increasing [`ItemId`]s.
#[derive(Debug, Clone, Default)]
struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    fn next_id(&mut self) -> ItemId {
        self.last += 1;
        ItemId(self.last)
    }
}

/// A non-empty ordered list of [`LineItem`]s.
#[derive(Debug, Clone)]
pub struct ItemStore {
    items: Vec<LineItem>,
    ids: IdGenerator,
    revision: u64,
}

impl Default for ItemStore {
    /// A store holding a single blank item.
    fn default() -> Self {
        Self::with_items(Vec::new())
    }
}

impl ItemStore {
    /// Builds a store from initial items, assigning ids in order.
    ///
    /// An empty seed list yields a single blank item.
    pub fn with_items(seeds: impl IntoIterator<Item = NewLineItem>) -> Self {
        let mut ids = IdGenerator::default();
        let mut items: Vec<LineItem> = seeds
            .into_iter()
            .map(|seed| seed.into_item(ids.next_id()))
            .collect();
        if items.is_empty() {
            items.push(LineItem::blank(ids.next_id()));
        }
        Self {
            items,
            ids,
            revision: 0,
        }
    }

    /// The items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Never true: a store always holds at least one item.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(
        &self,
        id: ItemId,
    ) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Counter bumped by every applied mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Appends a blank item and returns its id.
    pub fn add(&mut self) -> ItemId {
        let id = self.ids.next_id();
        self.items.push(LineItem::blank(id));
        self.revision += 1;
        debug!(%id, "added item");
        id
    }

    /// Replaces `field` of the item with `id`.
    ///
    /// Amount and multiplier text is coerced with [`coerce_number`], so
    /// non-numeric input stores 0. Returns `false` if no item has `id`.
    pub fn update(
        &mut self,
        id: ItemId,
        field: ItemField,
        value: &str,
    ) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!(%id, "update ignored, unknown item");
            return false;
        };

        match field {
            ItemField::Description => item.description = value.to_string(),
            ItemField::Amount => item.amount = coerce_number(value),
            ItemField::Multiplier => item.multiplier = coerce_number(value),
        }
        self.revision += 1;
        debug!(%id, field = field.as_str(), "updated item");
        true
    }

    /// Removes the item with `id`.
    ///
    /// The last remaining item is never removed, and fixed items are not
    /// protected. Returns `true` if an item was removed.
    pub fn remove(
        &mut self,
        id: ItemId,
    ) -> bool {
        if self.items.len() <= 1 {
            debug!(%id, "remove ignored, last item");
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.revision += 1;
            debug!(%id, "removed item");
        }
        removed
    }
}
