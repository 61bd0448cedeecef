pub mod attack;
pub mod character;
pub mod config;
pub mod dice;
pub mod error;
pub mod game_master;
pub mod geometry;
pub mod inventory;
pub mod journal;
pub mod location;
pub mod replay;
pub mod rulebook;
pub mod scenario;
pub mod sheet;
pub mod simulation;
pub mod types;

#[cfg(test)]
mod test_support;

pub use character::{Character, DamageOutcome};
pub use config::SimConfig;
pub use error::{CommandError, ConfigError, ContentError};
pub use game_master::{GameMaster, GridPointFilter};
pub use journal::{CommandJournal, CommandRecord};
pub use location::{Cell, Location};
pub use replay::*;
pub use rulebook::Rulebook;
pub use scenario::{Scenario, ScenarioActor};
pub use simulation::{AttackOutcome, Command, Simulation};
pub use types::*;
