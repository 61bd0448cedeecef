//! The combat actor and the values combat derives from it.
//! This module exists to own the character sheet and its pure derived views.
//! Mutations are split by concern: `equipment` (equip, unequip, drop), `progression`
//! (XP, levels, skill ranks) and `damage` (stress, consequences, taken out).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attack::{AttackMarker, AttackShapeMarker};
use crate::error::ContentError;
use crate::geometry::Transform;
use crate::inventory::Inventory;
use crate::rulebook::{Item, Rulebook};
use crate::sheet::{Aspect, Attribute, Consequence, Stunt};
use crate::types::{ActorId, GridPoint};

mod damage;
mod equipment;
mod progression;

pub use damage::{ConsequenceSlot, DamageOutcome};
pub use progression::XP_PER_LEVEL_STEP;

fn default_radius() -> f32 {
    0.5
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(skip)]
    pub id: ActorId,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub alertness_radius: f32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub skill_points: u32,
    pub physical_stress: Attribute,
    /// Base consequences, in declaration order.
    #[serde(default)]
    pub consequences: Vec<Consequence>,
    #[serde(default)]
    pub skills: BTreeMap<String, u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub aspects: Vec<Aspect>,
    #[serde(default)]
    pub stunts: Vec<Stunt>,
    /// Slot name to the held item occupying it.
    #[serde(default)]
    pub equipment: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub is_taken_out: bool,
    /// Actor types this character engages.
    #[serde(default)]
    pub enemies: Vec<String>,
    #[serde(default)]
    pub transform: Transform,
    #[serde(skip)]
    pub scheduled_attack: AttackMarker,
    /// Grid position of the cell this actor was last moved into.
    #[serde(skip)]
    pub current_cell: Option<GridPoint>,
    #[serde(skip)]
    pub spin: i32,
}

impl Character {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, max_stress: i32) -> Self {
        Self {
            id: ActorId::default(),
            kind: kind.into(),
            name: name.into(),
            radius: default_radius(),
            alertness_radius: 0.0,
            xp: 0,
            skill_points: 0,
            physical_stress: Attribute::new(0, 0, max_stress),
            consequences: Vec::new(),
            skills: BTreeMap::new(),
            tags: Vec::new(),
            aspects: Vec::new(),
            stunts: Vec::new(),
            equipment: BTreeMap::new(),
            inventory: Inventory::new(),
            is_taken_out: false,
            enemies: Vec::new(),
            transform: Transform::default(),
            scheduled_attack: AttackMarker::default(),
            current_cell: None,
            spin: 0,
        }
    }

    pub fn with_skill(mut self, skill: &str, rank: u32) -> Self {
        self.skills.insert(skill.to_string(), rank);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|tag| tag.to_string()).collect();
        self
    }

    pub fn with_enemies(mut self, enemies: &[&str]) -> Self {
        self.enemies = enemies.iter().map(|enemy| enemy.to_string()).collect();
        self
    }

    pub fn with_aspect(mut self, aspect: Aspect) -> Self {
        self.aspects.push(aspect);
        self
    }

    pub fn with_stunt(mut self, stunt: Stunt) -> Self {
        self.stunts.push(stunt);
        self
    }

    pub fn with_consequence(mut self, consequence: Consequence) -> Self {
        self.consequences.push(consequence);
        self
    }

    /// Declares empty equipment slots.
    pub fn with_slots(mut self, slots: &[&str]) -> Self {
        for slot in slots {
            self.equipment.entry(slot.to_string()).or_insert(None);
        }
        self
    }

    pub fn at(mut self, position: GridPoint) -> Self {
        self.transform.position = position;
        self
    }

    /// Checks authored data: known skills, and every equipped item held and in its own slot.
    pub fn validate(&self, rulebook: &Rulebook) -> Result<(), ContentError> {
        for skill in self.skills.keys() {
            rulebook.skill(skill)?;
        }
        for (slot, equipped) in &self.equipment {
            let Some(name) = equipped else { continue };
            let item = self
                .inventory
                .item(name)
                .ok_or_else(|| ContentError::EquippedItemNotHeld { item: name.clone() })?;
            if item.equipment_slot != *slot {
                return Err(ContentError::InvalidLoadout { item: name.clone(), slot: slot.clone() });
            }
        }
        Ok(())
    }

    pub fn position(&self) -> GridPoint {
        self.transform.position
    }

    pub fn skill_rank(&self, skill: &str) -> Option<u32> {
        self.skills.get(skill).copied()
    }

    pub fn stunt(&self, name: &str) -> Option<&Stunt> {
        self.stunts.iter().find(|stunt| stunt.name == name)
    }

    /// Rank plus the bonus of every aspect that affects `skill` and matches `tags`.
    /// A skill the character lacks counts as rank 0.
    pub fn skill_value(&self, skill: &str, tags: &[String]) -> i32 {
        let rank = self.skill_rank(skill).map_or(0, |rank| i32::try_from(rank).unwrap_or(i32::MAX));
        self.all_aspects()
            .into_iter()
            .filter(|aspect| aspect.affects(skill) && aspect.matches(tags) > 0)
            .fold(rank, |value, aspect| value.saturating_add(aspect.bonus))
    }

    /// Highest-valued skill among `opposing` that the character possesses. Defense
    /// starts from 0, so only a skill valued above 0 is picked. Ties keep the earlier
    /// skill.
    pub fn best_defense<'a>(
        &self,
        opposing: &'a [String],
        tags: &[String],
    ) -> Option<(&'a str, i32)> {
        let mut best: Option<(&str, i32)> = None;
        let mut current = 0;
        for skill in opposing.iter().filter(|skill| self.skills.contains_key(skill.as_str())) {
            let value = self.skill_value(skill, tags);
            if value > current {
                current = value;
                best = Some((skill.as_str(), value));
            }
        }
        best
    }

    /// Own aspects, then effects of taken consequences, then aspects of equipped items.
    pub fn all_aspects(&self) -> Vec<&Aspect> {
        let mut aspects: Vec<&Aspect> = self.aspects.iter().collect();
        aspects.extend(
            self.all_consequences()
                .into_iter()
                .filter(|consequence| consequence.is_taken)
                .filter_map(|consequence| consequence.effect.as_ref()),
        );
        aspects.extend(self.equipped_items().flat_map(|item| item.aspects.iter()));
        aspects
    }

    pub fn equipped_items(&self) -> impl Iterator<Item = &Item> {
        self.equipment.values().flatten().filter_map(|name| self.inventory.item(name))
    }

    pub fn weapons(&self) -> impl Iterator<Item = &Item> {
        self.equipped_items().filter(|item| item.is_weapon())
    }

    pub fn protection(&self) -> i32 {
        self.equipped_items().map(Item::protection).sum()
    }

    pub fn damage(&self) -> i32 {
        self.weapons().map(Item::damage).sum()
    }

    /// Fastest equipped weapon plus one; 1 when unarmed.
    pub fn attack_speed(&self) -> f32 {
        self.weapons().filter_map(Item::speed).fold(0.0, f32::max) + 1.0
    }

    /// Union of every equipped weapon's shape, or the default cone when there is none.
    pub fn attack_shape(&self) -> Vec<AttackShapeMarker> {
        let shape: Vec<AttackShapeMarker> =
            self.weapons().flat_map(|weapon| weapon.attack_shape().iter().cloned()).collect();
        if shape.is_empty() { vec![AttackShapeMarker::default()] } else { shape }
    }

    /// Build cost: skill ranks, consequence capacities, protection, damage and stress track.
    pub fn cost(&self) -> u32 {
        let skills: i64 = self.skills.values().map(|rank| i64::from(*rank)).sum();
        let consequences: i64 =
            self.all_consequences().iter().map(|consequence| i64::from(consequence.capacity)).sum();
        let total = skills
            + consequences
            + i64::from(self.protection())
            + i64::from(self.damage())
            + i64::from(self.physical_stress.max);
        u32::try_from(total.max(0)).unwrap_or(u32::MAX)
    }
}
