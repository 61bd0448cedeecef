//! Equipping, unequipping and dropping held items.

use super::*;

impl Character {
    /// Equips a held item into `slot`, first freeing whatever occupies it. Returns `false`
    /// with no change when the item is not held, `slot` is not the item's slot, or the
    /// character has no such slot.
    pub fn equip(&mut self, item: &str, slot: &str) -> bool {
        let Some(held) = self.inventory.item(item) else {
            return false;
        };
        if held.equipment_slot != slot || !self.equipment.contains_key(slot) {
            return false;
        }
        if let Some(Some(current)) = self.equipment.get(slot).cloned() {
            self.unequip(&current);
        }
        self.equipment.insert(slot.to_string(), Some(item.to_string()));
        true
    }

    /// Frees the slot holding `item`. Returns the slot it was in.
    pub fn unequip(&mut self, item: &str) -> Option<String> {
        let slot = self.equipped_slot(item)?.to_string();
        self.equipment.insert(slot.clone(), None);
        Some(slot)
    }

    pub fn equipped_slot(&self, item: &str) -> Option<&str> {
        self.equipment
            .iter()
            .find(|(_, equipped)| equipped.as_deref() == Some(item))
            .map(|(slot, _)| slot.as_str())
    }

    pub fn equipped_in(&self, slot: &str) -> Option<&str> {
        self.equipment.get(slot)?.as_deref()
    }

    /// Removes `quantity` units from the inventory. Dropping the last unit of an
    /// equipped item unequips it.
    pub fn drop_item(&mut self, item: &str, quantity: u32) -> bool {
        if !self.inventory.remove(item, quantity) {
            return false;
        }
        if !self.inventory.contains(item) {
            self.unequip(item);
        }
        true
    }
}
