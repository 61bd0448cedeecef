//! The world grid: a location made of sparse cells keyed by integer grid position.
//!
//! Actor positions are fine-grained points; each cell covers a `GRID_SIZE` square of
//! them. Cell tags are resolved against the rulebook once, right after loading, and are
//! fixed from then on.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::rulebook::Rulebook;
use crate::types::{GridPoint, merge_tags};

/// Side length of a cell, in actor grid points.
pub const GRID_SIZE: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellEventKind {
    OnItemsPickedUp,
}

/// Trigger attached to a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEvent {
    pub kind: CellEventKind,
    pub condition: String,
    pub value: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "type")]
    pub cell_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub position: GridPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub monsters: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub npcs: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub items: BTreeMap<String, u32>,
    /// Decoration name to its placement inside the cell.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub decorations: BTreeMap<String, GridPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CellEvent>,
}

impl Cell {
    pub fn new(cell_type: impl Into<String>, position: GridPoint) -> Self {
        Self { cell_type: cell_type.into(), position, ..Self::default() }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|tag| tag.to_string()).collect();
        self
    }
}

/// Inclusive extent of a location's cell positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub max_y: i32,
    pub max_x: i32,
    pub min_y: i32,
}

impl BoundingBox {
    /// `[min_x, max_y, max_x, min_y]`, top-left to bottom-right.
    pub fn as_array(&self) -> [i32; 4] {
        [self.min_x, self.max_y, self.max_x, self.min_y]
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(skip)]
    bbox: OnceLock<BoundingBox>,
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.tags == other.tags
            && self.cells == other.cells
    }
}

impl Location {
    pub fn new(name: impl Into<String>, tags: &[&str], cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            cells,
            bbox: OnceLock::new(),
        }
    }

    /// Parses a location and resolves it against `rulebook`.
    pub fn from_json(text: &str, rulebook: &Rulebook) -> Result<Self, ContentError> {
        let mut location: Self = serde_json::from_str(text)
            .map_err(|source| ContentError::Parse { what: "location", source })?;
        location.resolve(rulebook)?;
        Ok(location)
    }

    pub fn load(path: &Path, rulebook: &Rulebook) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ContentError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text, rulebook)
    }

    pub fn to_json(&self) -> Result<String, ContentError> {
        serde_json::to_string_pretty(self)
            .map_err(|source| ContentError::Serialize { what: "location", source })
    }

    /// Checks positions, cell types and cell items, then folds location and blueprint
    /// tags into every cell: declared tags first, then location tags, then blueprint tags.
    /// Resolving twice leaves the tags unchanged.
    pub fn resolve(&mut self, rulebook: &Rulebook) -> Result<(), ContentError> {
        let mut seen = BTreeSet::new();
        for cell in &self.cells {
            if !seen.insert(cell.position) {
                return Err(ContentError::DuplicateCell { x: cell.position.x, y: cell.position.y });
            }
            rulebook.cell_blueprint(&cell.cell_type)?;
            for item in cell.items.keys() {
                rulebook.item(item)?;
            }
        }

        for cell in &mut self.cells {
            let mut tags = Vec::with_capacity(cell.tags.len() + self.tags.len());
            merge_tags(&mut tags, &cell.tags);
            merge_tags(&mut tags, &self.tags);
            merge_tags(&mut tags, &rulebook.cell_blueprint(&cell.cell_type)?.tags);
            cell.tags = tags;
        }
        self.bbox = OnceLock::new();
        log::debug!("resolved location `{}` with {} cells", self.name, self.cells.len());
        Ok(())
    }

    /// Computed on first access; an empty location yields all zeros.
    pub fn bounding_box(&self) -> BoundingBox {
        *self.bbox.get_or_init(|| {
            let mut positions = self.cells.iter().map(|cell| cell.position);
            let Some(first) = positions.next() else {
                return BoundingBox::default();
            };
            positions.fold(
                BoundingBox { min_x: first.x, max_y: first.y, max_x: first.x, min_y: first.y },
                |bbox, p| BoundingBox {
                    min_x: bbox.min_x.min(p.x),
                    max_y: bbox.max_y.max(p.y),
                    max_x: bbox.max_x.max(p.x),
                    min_y: bbox.min_y.min(p.y),
                },
            )
        })
    }

    /// Cell covering the fine position `(x, y)`: `x` is floored and `y` ceiled after
    /// dividing by `GRID_SIZE`.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<&Cell> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let column = (x / GRID_SIZE).floor() as i32;
        let row = (y / GRID_SIZE).ceil() as i32;
        self.cell(GridPoint::new(column, row))
    }

    pub fn cell_at_point(&self, point: GridPoint) -> Option<&Cell> {
        self.cell_at(point.x as f32, point.y as f32)
    }

    /// Cell stored at grid position `position`.
    pub fn cell(&self, position: GridPoint) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.position == position)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        let bbox = self.bounding_box();
        for y in (bbox.min_y..=bbox.max_y).rev() {
            for x in bbox.min_x..=bbox.max_x {
                let initial =
                    self.cell(GridPoint::new(x, y)).and_then(|cell| cell.cell_type.chars().next());
                match initial {
                    Some(initial) => write!(f, "[{initial}]")?,
                    None => f.write_str("   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
