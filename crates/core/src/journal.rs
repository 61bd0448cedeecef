use serde::{Deserialize, Serialize};

use crate::simulation::Command;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Everything needed to reproduce a session on top of a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandJournal {
    pub format_version: u16,
    pub seed: u64,
    pub records: Vec<CommandRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: Command,
}

impl CommandJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, records: Vec::new() }
    }

    /// Appends `command` with the next sequence number and returns that number.
    pub fn append(&mut self, command: Command) -> u64 {
        let seq = self.records.last().map_or(0, |record| record.seq + 1);
        self.records.push(CommandRecord { seq, command });
        seq
    }
}
