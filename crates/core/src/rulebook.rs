//! Authored content: skills, cell blueprints and items.
//! A `Rulebook` is loaded once before any simulation starts and is read-only afterwards;
//! a lookup that misses is a broken content package, reported as `ContentError`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attack::AttackShapeMarker;
use crate::error::ContentError;
use crate::sheet::{Aspect, Consequence};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub name: String,
    /// Skills a defender may oppose this skill with.
    #[serde(default)]
    pub opposing_skills: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellBlueprint {
    #[serde(rename = "type")]
    pub cell_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Decoration name to spawn density.
    #[serde(default)]
    pub decorations: BTreeMap<String, f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub cost: i32,
    pub equipment_slot: String,
    #[serde(default)]
    pub aspects: Vec<Aspect>,
    #[serde(flatten)]
    pub kind: ItemKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ItemKind {
    Weapon {
        damage: i32,
        #[serde(default)]
        speed: f32,
        #[serde(default)]
        attack_shape: Vec<AttackShapeMarker>,
    },
    Armor {
        protection: i32,
        #[serde(default)]
        consequences: Vec<Consequence>,
    },
}

impl Item {
    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. })
    }

    pub fn damage(&self) -> i32 {
        match self.kind {
            ItemKind::Weapon { damage, .. } => damage,
            ItemKind::Armor { .. } => 0,
        }
    }

    pub fn speed(&self) -> Option<f32> {
        match self.kind {
            ItemKind::Weapon { speed, .. } => Some(speed),
            ItemKind::Armor { .. } => None,
        }
    }

    pub fn protection(&self) -> i32 {
        match self.kind {
            ItemKind::Armor { protection, .. } => protection,
            ItemKind::Weapon { .. } => 0,
        }
    }

    pub fn attack_shape(&self) -> &[AttackShapeMarker] {
        match &self.kind {
            ItemKind::Weapon { attack_shape, .. } => attack_shape,
            ItemKind::Armor { .. } => &[],
        }
    }

    pub fn consequences(&self) -> &[Consequence] {
        match &self.kind {
            ItemKind::Armor { consequences, .. } => consequences,
            ItemKind::Weapon { .. } => &[],
        }
    }

    pub fn consequences_mut(&mut self) -> &mut [Consequence] {
        match &mut self.kind {
            ItemKind::Armor { consequences, .. } => consequences,
            ItemKind::Weapon { .. } => &mut [],
        }
    }
}

/// On-disk layout of a rulebook.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RulebookFile {
    #[serde(default)]
    skills: Vec<SkillDefinition>,
    #[serde(default)]
    cell_blueprints: Vec<CellBlueprint>,
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rulebook {
    skills: BTreeMap<String, SkillDefinition>,
    cell_blueprints: BTreeMap<String, CellBlueprint>,
    items: BTreeMap<String, Item>,
}

impl Rulebook {
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let file: RulebookFile = serde_json::from_str(text)
            .map_err(|source| ContentError::Parse { what: "rulebook", source })?;
        Self::from_parts(file.skills, file.cell_blueprints, file.items)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ContentError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    /// Builds the lookup tables and checks that every opposing skill is defined.
    pub fn from_parts(
        skills: Vec<SkillDefinition>,
        cell_blueprints: Vec<CellBlueprint>,
        items: Vec<Item>,
    ) -> Result<Self, ContentError> {
        let skills: BTreeMap<String, SkillDefinition> =
            skills.into_iter().map(|skill| (skill.name.clone(), skill)).collect();
        for skill in skills.values() {
            if let Some(missing) =
                skill.opposing_skills.iter().find(|opposing| !skills.contains_key(*opposing))
            {
                return Err(ContentError::UnknownSkill(missing.clone()));
            }
        }

        let cell_blueprints = cell_blueprints
            .into_iter()
            .map(|blueprint| (blueprint.cell_type.clone(), blueprint))
            .collect();
        let items = items.into_iter().map(|item| (item.name.clone(), item)).collect();

        Ok(Self { skills, cell_blueprints, items })
    }

    pub fn to_json(&self) -> Result<String, ContentError> {
        let file = RulebookFile {
            skills: self.skills.values().cloned().collect(),
            cell_blueprints: self.cell_blueprints.values().cloned().collect(),
            items: self.items.values().cloned().collect(),
        };
        serde_json::to_string_pretty(&file)
            .map_err(|source| ContentError::Serialize { what: "rulebook", source })
    }

    pub fn skill(&self, name: &str) -> Result<&SkillDefinition, ContentError> {
        self.skills.get(name).ok_or_else(|| ContentError::UnknownSkill(name.to_string()))
    }

    pub fn opposing_skills(&self, name: &str) -> Result<&[String], ContentError> {
        self.skill(name).map(|skill| skill.opposing_skills.as_slice())
    }

    pub fn cell_blueprint(&self, cell_type: &str) -> Result<&CellBlueprint, ContentError> {
        self.cell_blueprints
            .get(cell_type)
            .ok_or_else(|| ContentError::UnknownCellType(cell_type.to_string()))
    }

    pub fn item(&self, name: &str) -> Result<&Item, ContentError> {
        self.items.get(name).ok_or_else(|| ContentError::UnknownItem(name.to_string()))
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
