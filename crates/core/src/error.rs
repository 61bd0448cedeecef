//! Error types for content loading, configuration and journaled commands.
//! Runtime requests that merely fail (equip the wrong slot, attack while attacking)
//! report `bool`/`Option` instead and never reach these types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ActorId;

/// Broken or missing authored content. Fatal at load time.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("unknown skill `{0}`")]
    UnknownSkill(String),
    #[error("unknown cell type `{0}`")]
    UnknownCellType(String),
    #[error("unknown item `{0}`")]
    UnknownItem(String),
    #[error("two cells share grid position ({x}, {y})")]
    DuplicateCell { x: i32, y: i32 },
    #[error("no cell at grid position ({x}, {y})")]
    MissingCell { x: i32, y: i32 },
    #[error("item `{item}` is equipped but not held")]
    EquippedItemNotHeld { item: String },
    #[error("item `{item}` cannot be equipped into slot `{slot}`")]
    InvalidLoadout { item: String, slot: String },
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config format version {found} is not supported (expected {expected})")]
    FormatVersion { found: u32, expected: u32 },
    #[error("dice range {min}..={max} is empty")]
    InvalidDiceRange { min: i32, max: i32 },
    #[error("tick length must be positive, got {0}")]
    InvalidTickSeconds(f32),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no actor with id {0:?}")]
    UnknownActor(ActorId),
    #[error(transparent)]
    Content(#[from] ContentError),
}
