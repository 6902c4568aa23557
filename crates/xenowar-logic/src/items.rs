//! String-keyed item inventory for a base.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Quantities of stored items, keyed by rule identifier.
///
/// Zero-quantity entries are removed so serialized inventories stay
/// minimal and membership checks stay meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemContainer {
    items: BTreeMap<String, u32>,
}

impl ItemContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of an item.
    pub fn add(&mut self, name: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(name.to_string()).or_insert(0) += quantity;
    }

    /// Remove up to `quantity` units. Returns the number actually removed.
    pub fn remove(&mut self, name: &str, quantity: u32) -> u32 {
        match self.items.get_mut(name) {
            Some(held) => {
                let removed = quantity.min(*held);
                *held -= removed;
                if *held == 0 {
                    self.items.remove(name);
                }
                removed
            }
            None => 0,
        }
    }

    /// Units currently held of an item. Unknown items are zero.
    pub fn quantity(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, qty)| (name.as_str(), *qty))
    }
}
