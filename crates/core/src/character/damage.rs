//! Stress, consequences and being taken out.

use super::*;

/// Where a consequence lives: on an equipped armor instance or on the base track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsequenceSlot {
    Armor { item: String, index: usize },
    Base(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    Stress { amount: i32, stress: i32 },
    Consequence { name: String, damage: i32 },
    TakenOut { damage: i32 },
}

impl Character {
    /// Absorption order: equipped armor consequences sorted by capacity (stable), then
    /// base consequences in declaration order.
    pub fn consequence_slots(&self) -> Vec<ConsequenceSlot> {
        let mut armor: Vec<(i32, ConsequenceSlot)> = self
            .equipped_items()
            .flat_map(|item| {
                item.consequences().iter().enumerate().map(move |(index, consequence)| {
                    let slot = ConsequenceSlot::Armor { item: item.name.clone(), index };
                    (consequence.capacity, slot)
                })
            })
            .collect();
        armor.sort_by_key(|(capacity, _)| *capacity);

        armor
            .into_iter()
            .map(|(_, slot)| slot)
            .chain((0..self.consequences.len()).map(ConsequenceSlot::Base))
            .collect()
    }

    pub fn consequence(&self, slot: &ConsequenceSlot) -> Option<&Consequence> {
        match slot {
            ConsequenceSlot::Armor { item, index } => {
                self.inventory.item(item)?.consequences().get(*index)
            }
            ConsequenceSlot::Base(index) => self.consequences.get(*index),
        }
    }

    pub fn consequence_mut(&mut self, slot: &ConsequenceSlot) -> Option<&mut Consequence> {
        match slot {
            ConsequenceSlot::Armor { item, index } => {
                self.inventory.item_mut(item)?.consequences_mut().get_mut(*index)
            }
            ConsequenceSlot::Base(index) => self.consequences.get_mut(*index),
        }
    }

    pub fn all_consequences(&self) -> Vec<&Consequence> {
        self.consequence_slots().iter().filter_map(|slot| self.consequence(slot)).collect()
    }

    pub fn find_consequence_slot(&self, name: &str) -> Option<ConsequenceSlot> {
        self.consequence_slots()
            .into_iter()
            .find(|slot| self.consequence(slot).is_some_and(|consequence| consequence.name == name))
    }

    /// Applies `incoming` after protection. Overflowing the stress track escalates to a
    /// consequence, which carries `effect` once taken.
    pub fn receive_damage(&mut self, incoming: i32, effect: &Aspect) -> DamageOutcome {
        let damage = incoming.saturating_sub(self.protection()).max(0);
        if self.physical_stress.would_overflow(damage) {
            return self.take_consequence(damage, effect);
        }
        self.physical_stress.add(damage);
        DamageOutcome::Stress { amount: damage, stress: self.physical_stress.value }
    }

    /// Takes the first free consequence able to absorb `damage`; with none left the
    /// character is taken out.
    pub fn take_consequence(&mut self, damage: i32, effect: &Aspect) -> DamageOutcome {
        let slot = self.consequence_slots().into_iter().find(|slot| {
            self.consequence(slot).is_some_and(|consequence| consequence.can_absorb(damage))
        });
        if let Some(consequence) = slot.and_then(|slot| self.consequence_mut(&slot)) {
            consequence.take(effect.clone());
            return DamageOutcome::Consequence { name: consequence.name.clone(), damage };
        }
        self.is_taken_out = true;
        DamageOutcome::TakenOut { damage }
    }
}
