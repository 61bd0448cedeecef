//! Commands accepted from the host, and the wrappers that turn sheet edits into events.
//! Every command is journaled, so applying the same sequence to the same scenario and
//! seed must reach the same state.

use serde::{Deserialize, Serialize};

use super::*;
use crate::types::GridPoint;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    MoveTo { actor: ActorId, x: f32, y: f32 },
    RotateTo { actor: ActorId, degrees: f32 },
    ScheduleAttack { actor: ActorId, skill: Option<String> },
    StopAttack { actor: ActorId },
    Equip { actor: ActorId, item: String, slot: String },
    Unequip { actor: ActorId, item: String },
    Heal { healer: ActorId, patient: ActorId, consequence: String },
    LevelUpSkill { actor: ActorId, skill: String },
    EnterCell { position: GridPoint },
    Advance { seconds: f32 },
}

impl Simulation {
    /// Requests that merely fail (wrong slot, attack in flight, too few skill points) are
    /// no-ops; only unknown actors and unknown content are errors.
    pub fn apply_command(&mut self, command: &Command) -> Result<(), CommandError> {
        match command {
            Command::MoveTo { actor, x, y } => {
                self.move_to(*actor, *x, *y)?;
            }
            Command::RotateTo { actor, degrees } => {
                self.rotate_to(*actor, *degrees)?;
            }
            Command::ScheduleAttack { actor, skill } => {
                self.schedule_attack(*actor, skill.as_deref())?;
            }
            Command::StopAttack { actor } => {
                self.stop_attack(*actor)?;
            }
            Command::Equip { actor, item, slot } => {
                self.equip(*actor, item, slot)?;
            }
            Command::Unequip { actor, item } => {
                self.unequip(*actor, item)?;
            }
            Command::Heal { healer, patient, consequence } => {
                self.heal(*healer, *patient, consequence)?;
            }
            Command::LevelUpSkill { actor, skill } => {
                self.level_up_skill(*actor, skill)?;
            }
            Command::EnterCell { position } => {
                self.enter_cell(*position);
            }
            Command::Advance { seconds } => self.advance(*seconds)?,
        }
        Ok(())
    }

    /// Equips a held item, raising `Unequipped` for whatever it displaces.
    pub fn equip(&mut self, actor: ActorId, item: &str, slot: &str) -> Result<bool, CommandError> {
        let character = self.character_mut(actor)?;
        let displaced = character.equipped_in(slot).map(str::to_string);
        if !character.equip(item, slot) {
            return Ok(false);
        }
        if let Some(displaced) = displaced {
            self.events.push(SimEvent::Unequipped {
                actor,
                item: displaced,
                slot: slot.to_string(),
            });
        }
        self.events.push(SimEvent::Equipped {
            actor,
            item: item.to_string(),
            slot: slot.to_string(),
        });
        Ok(true)
    }

    pub fn unequip(&mut self, actor: ActorId, item: &str) -> Result<bool, CommandError> {
        let Some(slot) = self.character_mut(actor)?.unequip(item) else {
            return Ok(false);
        };
        self.events.push(SimEvent::Unequipped { actor, item: item.to_string(), slot });
        Ok(true)
    }

    /// Spends skill points on `skill`, which must exist in the rulebook.
    pub fn level_up_skill(
        &mut self,
        actor: ActorId,
        skill: &str,
    ) -> Result<Option<u32>, CommandError> {
        self.rulebook.skill(skill)?;
        let rank = self.character_mut(actor)?.level_up_skill(skill);
        if let Some(rank) = rank {
            self.events.push(SimEvent::SkillLeveled { actor, skill: skill.to_string(), rank });
        }
        Ok(rank)
    }
}
