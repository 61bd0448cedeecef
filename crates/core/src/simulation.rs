//! The simulation context: rulebook, registry, dice and the outbound event queue.
//!
//! Every operation that changes actor state goes through `Simulation` so events are
//! raised in the order the state changes happen. The host drains them with
//! `drain_events` once per tick.

use std::mem;
use std::sync::Arc;

use crate::character::Character;
use crate::config::SimConfig;
use crate::dice::{Dice, SeededDice};
use crate::error::{CommandError, ContentError};
use crate::game_master::GameMaster;
use crate::rulebook::Rulebook;
use crate::types::{ActorId, SimEvent};

mod combat;
mod commands;
mod hash;
mod movement;

pub use combat::AttackOutcome;
pub use commands::Command;

pub struct Simulation {
    rulebook: Arc<Rulebook>,
    config: SimConfig,
    dice: Box<dyn Dice>,
    game_master: GameMaster,
    events: Vec<SimEvent>,
    seed: u64,
    tick: u64,
}

impl Simulation {
    /// Rolls come from a `SeededDice` over the configured range.
    pub fn new(rulebook: Arc<Rulebook>, config: SimConfig, seed: u64) -> Self {
        let dice = SeededDice::new(seed, config.dice);
        Self::with_dice(rulebook, config, seed, dice)
    }

    pub fn with_dice(
        rulebook: Arc<Rulebook>,
        config: SimConfig,
        seed: u64,
        dice: impl Dice + 'static,
    ) -> Self {
        Self {
            rulebook,
            config,
            dice: Box::new(dice),
            game_master: GameMaster::new(),
            events: Vec::new(),
            seed,
            tick: 0,
        }
    }

    pub fn rulebook(&self) -> &Rulebook {
        &self.rulebook
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn game_master(&self) -> &GameMaster {
        &self.game_master
    }

    pub fn game_master_mut(&mut self) -> &mut GameMaster {
        &mut self.game_master
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn actor(&self, id: ActorId) -> Option<&Character> {
        self.game_master.actor(id)
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        mem::take(&mut self.events)
    }

    /// Validates `character` against the rulebook, stores and registers it, and binds it
    /// to the cell under its stored position.
    pub fn spawn(&mut self, character: Character) -> Result<ActorId, ContentError> {
        character.validate(&self.rulebook)?;
        let position = character.position();
        let id = self.game_master.spawn(character);
        self.game_master.register_character(id);
        self.place(id, position.x as f32, position.y as f32);
        log::debug!("spawned {id:?}");
        Ok(id)
    }

    /// Moves every in-flight attack forward by `seconds`, resolving hits whose wind-up
    /// completes and releasing attacks whose wind-down has run out. Actors act in
    /// registration order.
    pub fn advance(&mut self, seconds: f32) -> Result<(), CommandError> {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.tick += 1;

        let actors = self.game_master.registered().to_vec();
        for id in actors {
            let Some(character) = self.game_master.actor_mut(id) else { continue };
            if character.is_taken_out {
                continue;
            }
            if character.scheduled_attack.advance(seconds) {
                self.resolve_attack(id)?;
            }
            let Some(character) = self.game_master.actor_mut(id) else { continue };
            if character.scheduled_attack.is_finished() {
                character.scheduled_attack.stop();
                self.events.push(SimEvent::AttackStopped { actor: id, completed: true });
            }
        }
        Ok(())
    }

    fn character(&self, id: ActorId) -> Result<&Character, CommandError> {
        self.game_master.actor(id).ok_or(CommandError::UnknownActor(id))
    }

    fn character_mut(&mut self, id: ActorId) -> Result<&mut Character, CommandError> {
        self.game_master.actor_mut(id).ok_or(CommandError::UnknownActor(id))
    }
}

#[cfg(test)]
mod tests;
