use std::sync::Arc;

use thiserror::Error;

use crate::config::SimConfig;
use crate::error::{CommandError, ContentError};
use crate::journal::{CommandJournal, JOURNAL_FORMAT_VERSION};
use crate::rulebook::Rulebook;
use crate::scenario::Scenario;
use crate::simulation::Simulation;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("journal format version {found} is not supported (expected {expected})")]
    FormatVersion { found: u16, expected: u16 },
    #[error("scenario could not be installed: {0}")]
    Content(#[from] ContentError),
    #[error("record {seq} failed: {source}")]
    Command {
        seq: u64,
        #[source]
        source: CommandError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_tick: u64,
    pub snapshot_hash: u64,
    /// Names of registered actors that ended the run taken out, in registration order.
    pub taken_out: Vec<String>,
}

/// Rebuilds the simulation from `scenario` with the journal's seed and applies every
/// record in order.
pub fn replay(
    rulebook: Arc<Rulebook>,
    config: SimConfig,
    scenario: &Scenario,
    journal: &CommandJournal,
) -> Result<ReplayResult, ReplayError> {
    let sim = replay_simulation(rulebook, config, scenario, journal)?;
    Ok(summarize(&sim))
}

/// Same as `replay`, but hands back the simulation for further inspection.
pub fn replay_simulation(
    rulebook: Arc<Rulebook>,
    config: SimConfig,
    scenario: &Scenario,
    journal: &CommandJournal,
) -> Result<Simulation, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::FormatVersion {
            found: journal.format_version,
            expected: JOURNAL_FORMAT_VERSION,
        });
    }

    let mut sim = Simulation::new(rulebook, config, journal.seed);
    scenario.install(&mut sim)?;
    for record in &journal.records {
        sim.apply_command(&record.command)
            .map_err(|source| ReplayError::Command { seq: record.seq, source })?;
    }
    log::debug!("replayed {} record(s) to tick {}", journal.records.len(), sim.current_tick());
    Ok(sim)
}

pub fn summarize(sim: &Simulation) -> ReplayResult {
    ReplayResult {
        final_tick: sim.current_tick(),
        snapshot_hash: sim.snapshot_hash(),
        taken_out: sim
            .game_master()
            .registered_characters()
            .filter(|character| character.is_taken_out)
            .map(|character| character.name.clone())
            .collect(),
    }
}
