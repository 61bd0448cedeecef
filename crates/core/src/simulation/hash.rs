//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from command handling.
//! It does not own replay execution or journal persistence.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Simulation {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        match self.game_master.current_cell() {
            Some(cell) => {
                hasher.write_u8(1);
                hasher.write_i32(cell.position.x);
                hasher.write_i32(cell.position.y);
            }
            None => hasher.write_u8(0),
        }

        hasher.write_usize(self.game_master.registered().len());
        for character in self.game_master.registered_characters() {
            hasher.write(character.name.as_bytes());
            hasher.write_i32(character.transform.position.x);
            hasher.write_i32(character.transform.position.y);
            hasher.write_u32(character.transform.rotation.to_bits());
            hasher.write_i32(character.physical_stress.value);
            hasher.write_u32(character.xp);
            hasher.write_u32(character.skill_points);
            hasher.write_i32(character.spin);
            hasher.write_u8(u8::from(character.is_taken_out));
            for consequence in &character.consequences {
                hasher.write_u8(u8::from(consequence.is_taken));
            }
            for (slot, item) in &character.equipment {
                hasher.write(slot.as_bytes());
                hasher.write(item.as_deref().unwrap_or_default().as_bytes());
            }
            // Armor keeps its consequences while unequipped.
            for entry in character.inventory.iter() {
                hasher.write(entry.item.name.as_bytes());
                hasher.write_u32(entry.quantity);
                for consequence in entry.item.consequences() {
                    hasher.write_u8(u8::from(consequence.is_taken));
                }
            }
            let attack = &character.scheduled_attack;
            hasher.write_u8(u8::from(attack.is_active()));
            hasher.write_u32(attack.current_time().to_bits());
            for (skill, rank) in &character.skills {
                hasher.write(skill.as_bytes());
                hasher.write_u32(*rank);
            }
        }
        hasher.finish()
    }
}
