//! Owned item instances with quantities.
//! Items are copied out of the rulebook on acquisition so per-actor state (taken armor
//! consequences) never touches shared content.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::rulebook::{Item, Rulebook};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: Item,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(
        &mut self,
        rulebook: &Rulebook,
        name: &str,
        quantity: u32,
    ) -> Result<(), ContentError> {
        let item = rulebook.item(name)?;
        self.add(item.clone(), quantity);
        Ok(())
    }

    /// Stacks onto an existing entry of the same name; the held instance is kept.
    pub fn add(&mut self, item: Item, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.entries.iter_mut().find(|entry| entry.item.name == item.name) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.entries.push(InventoryEntry { item, quantity }),
        }
    }

    /// Returns `false` without touching anything when fewer than `quantity` are held.
    pub fn remove(&mut self, name: &str, quantity: u32) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.item.name == name) else {
            return false;
        };
        let entry = &mut self.entries[index];
        if entry.quantity < quantity {
            return false;
        }
        entry.quantity -= quantity;
        if entry.quantity == 0 {
            self.entries.remove(index);
        }
        true
    }

    pub fn quantity(&self, name: &str) -> u32 {
        self.entries.iter().find(|entry| entry.item.name == name).map_or(0, |entry| entry.quantity)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.quantity(name) > 0
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.entries.iter().find(|entry| entry.item.name == name).map(|entry| &entry.item)
    }

    pub fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.entries.iter_mut().find(|entry| entry.item.name == name).map(|entry| &mut entry.item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
