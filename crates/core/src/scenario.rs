//! Authored starting state: an optional location, the cell the party starts in, and the
//! actors to spawn. Replays rebuild the same simulation from a scenario before applying
//! any journaled command.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::ContentError;
use crate::location::Location;
use crate::rulebook::Rulebook;
use crate::simulation::Simulation;
use crate::types::{ActorId, GridPoint};

/// A character plus the rulebook items it starts with, one unit per entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioActor {
    #[serde(flatten)]
    pub character: Character,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

impl From<Character> for ScenarioActor {
    fn from(character: Character) -> Self {
        Self { character, items: Vec::new() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_cell: Option<GridPoint>,
    #[serde(default)]
    pub actors: Vec<ScenarioActor>,
}

impl Scenario {
    /// Parses a scenario and resolves its location against `rulebook`.
    pub fn from_json(text: &str, rulebook: &Rulebook) -> Result<Self, ContentError> {
        let mut scenario: Self = serde_json::from_str(text)
            .map_err(|source| ContentError::Parse { what: "scenario", source })?;
        if let Some(location) = &mut scenario.location {
            location.resolve(rulebook)?;
        }
        Ok(scenario)
    }

    pub fn load(path: &Path, rulebook: &Rulebook) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ContentError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text, rulebook)
    }

    /// Activates the location, spawns every actor in order and enters the starting cell.
    /// Returns the new ids in the order the actors are listed.
    pub fn install(&self, sim: &mut Simulation) -> Result<Vec<ActorId>, ContentError> {
        sim.game_master_mut().set_current_location(self.location.clone());

        let mut ids = Vec::with_capacity(self.actors.len());
        for actor in &self.actors {
            let mut character = actor.character.clone();
            for item in &actor.items {
                character.inventory.acquire(sim.rulebook(), item, 1)?;
            }
            ids.push(sim.spawn(character)?);
        }

        if let Some(position) = self.current_cell
            && !sim.enter_cell(position)
        {
            return Err(ContentError::MissingCell { x: position.x, y: position.y });
        }
        log::info!("installed scenario with {} actor(s)", ids.len());
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::SimConfig;
    use crate::test_support::{SCENARIO_JSON, rulebook};

    fn installed() -> (Simulation, Vec<ActorId>) {
        let rulebook = rulebook();
        let scenario = Scenario::from_json(SCENARIO_JSON, &rulebook).unwrap();
        let mut sim = Simulation::new(Arc::new(rulebook), SimConfig::default(), 3);
        let ids = scenario.install(&mut sim).unwrap();
        (sim, ids)
    }

    #[test]
    fn actors_spawn_in_order_with_their_items() {
        let (sim, ids) = installed();
        let names: Vec<&str> =
            ids.iter().map(|id| sim.actor(*id).unwrap().name.as_str()).collect();
        assert_eq!(names, ["Sir Roderick", "Snik", "Grub"]);
        assert_eq!(sim.game_master().registered(), ids.as_slice());

        let knight = sim.actor(ids[0]).unwrap();
        assert_eq!(knight.equipped_in("MainHand"), Some("Shortsword"));
        assert_eq!(knight.protection(), 1);
    }

    #[test]
    fn location_tags_are_resolved_and_cells_bound() {
        let (sim, ids) = installed();
        assert_eq!(sim.game_master().current_tags(), ["forest", "open"]);
        let snik = sim.actor(ids[1]).unwrap();
        assert_eq!(snik.position(), GridPoint::new(1, 0));
        assert_eq!(snik.current_cell, Some(GridPoint::ORIGIN));
    }

    #[test]
    fn unknown_items_fail_installation() {
        let rulebook = rulebook();
        let mut actor = ScenarioActor::from(Character::new("Goblin", "Snik", 2));
        actor.items.push("Warhammer".to_string());
        let scenario = Scenario { actors: vec![actor], ..Scenario::default() };
        let mut sim = Simulation::new(Arc::new(rulebook), SimConfig::default(), 3);
        let result = scenario.install(&mut sim);
        assert!(matches!(result, Err(ContentError::UnknownItem(name)) if name == "Warhammer"));
    }

    #[test]
    fn starting_cell_must_exist() {
        let rulebook = rulebook();
        let mut scenario = Scenario::from_json(SCENARIO_JSON, &rulebook).unwrap();
        scenario.current_cell = Some(GridPoint::new(9, 9));
        let mut sim = Simulation::new(Arc::new(rulebook), SimConfig::default(), 3);
        let result = scenario.install(&mut sim);
        assert!(matches!(result, Err(ContentError::MissingCell { x: 9, y: 9 })));
    }
}
