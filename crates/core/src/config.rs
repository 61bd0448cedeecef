//! Tunable rule settings, read from TOML.
//! Every field has a default so a config file only needs the values it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sheet::Aspect;

pub const CONFIG_FORMAT_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRange {
    pub min: i32,
    pub max: i32,
}

impl Default for DiceRange {
    fn default() -> Self {
        Self { min: -4, max: 4 }
    }
}

/// Standing aspect attached to a consequence when it is taken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsequenceEffect {
    pub description: String,
    pub skills: Vec<String>,
    pub bonus: i32,
}

impl Default for ConsequenceEffect {
    fn default() -> Self {
        Self {
            description: "Consequence stand-in aspect that affects #any skill.".to_string(),
            skills: vec!["MeleeCombat".to_string()],
            bonus: -1,
        }
    }
}

impl ConsequenceEffect {
    pub fn to_aspect(&self) -> Aspect {
        Aspect {
            description: self.description.clone(),
            skills: self.skills.clone(),
            bonus: self.bonus,
            tags: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub format_version: u32,
    pub dice: DiceRange,
    pub default_attack_skill: String,
    pub healing_skill: String,
    pub tick_seconds: f32,
    pub consequence_effect: ConsequenceEffect,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            format_version: CONFIG_FORMAT_VERSION,
            dice: DiceRange::default(),
            default_attack_skill: "MeleeWeapons".to_string(),
            healing_skill: "Healing".to_string(),
            tick_seconds: 0.1,
            consequence_effect: ConsequenceEffect::default(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.format_version != CONFIG_FORMAT_VERSION {
            return Err(ConfigError::FormatVersion {
                found: self.format_version,
                expected: CONFIG_FORMAT_VERSION,
            });
        }
        if self.dice.min > self.dice.max {
            return Err(ConfigError::InvalidDiceRange { min: self.dice.min, max: self.dice.max });
        }
        if !(self.tick_seconds > 0.0) {
            return Err(ConfigError::InvalidTickSeconds(self.tick_seconds));
        }
        Ok(())
    }
}
