//! Actor registry, active location and ambient tags.
//! This module exists to answer "who is where" questions over registered actors.
//! It does not resolve combat or move actors; `Simulation` owns those flows.

use slotmap::SlotMap;

use crate::character::Character;
use crate::location::{Cell, Location};
use crate::types::{ActorId, GridPoint};

/// Optional narrowing for grid-point queries.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridPointFilter<'a> {
    pub excludes: &'a [ActorId],
    pub types: Option<&'a [String]>,
}

impl<'a> GridPointFilter<'a> {
    pub fn excluding(excludes: &'a [ActorId]) -> Self {
        Self { excludes, types: None }
    }

    pub fn of_types(types: &'a [String]) -> Self {
        Self { excludes: &[], types: Some(types) }
    }

    fn admits(&self, character: &Character) -> bool {
        !self.excludes.contains(&character.id)
            && self.types.is_none_or(|types| types.contains(&character.kind))
    }
}

#[derive(Clone, Debug, Default)]
pub struct GameMaster {
    actors: SlotMap<ActorId, Character>,
    registered: Vec<ActorId>,
    current_location: Option<Location>,
    current_cell: Option<Cell>,
}

impl GameMaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an actor without making it queryable.
    pub fn spawn(&mut self, character: Character) -> ActorId {
        let id = self.actors.insert(character);
        self.actors[id].id = id;
        id
    }

    /// Deregisters and drops the actor.
    pub fn remove(&mut self, id: ActorId) -> Option<Character> {
        self.deregister_character(id);
        self.actors.remove(id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Character> {
        self.actors.get(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Character> {
        self.actors.get_mut(id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Character> {
        self.actors.values()
    }

    /// Idempotent. Returns `true` only when the actor was newly registered.
    pub fn register_character(&mut self, id: ActorId) -> bool {
        if !self.actors.contains_key(id) || self.registered.contains(&id) {
            return false;
        }
        self.registered.push(id);
        true
    }

    /// Returns `false` when the actor was not registered.
    pub fn deregister_character(&mut self, id: ActorId) -> bool {
        let Some(index) = self.registered.iter().position(|registered| *registered == id) else {
            return false;
        };
        self.registered.remove(index);
        true
    }

    pub fn is_registered(&self, id: ActorId) -> bool {
        self.registered.contains(&id)
    }

    /// Registered actors in registration order.
    pub fn registered(&self) -> &[ActorId] {
        &self.registered
    }

    pub fn registered_characters(&self) -> impl Iterator<Item = &Character> {
        self.registered.iter().filter_map(|id| self.actors.get(*id))
    }

    /// Drops every actor and clears location and cell.
    pub fn reset(&mut self) {
        self.actors.clear();
        self.registered.clear();
        self.current_location = None;
        self.current_cell = None;
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.current_location.as_ref()
    }

    /// Switching location leaves the current cell unset.
    pub fn set_current_location(&mut self, location: Option<Location>) {
        self.current_location = location;
        self.current_cell = None;
    }

    pub fn current_cell(&self) -> Option<&Cell> {
        self.current_cell.as_ref()
    }

    pub fn set_current_cell(&mut self, cell: Option<Cell>) {
        self.current_cell = cell;
    }

    /// Makes the active location's cell at `position` current. Returns `false` and keeps
    /// the previous cell when there is no such cell.
    pub fn enter_cell(&mut self, position: GridPoint) -> bool {
        let Some(cell) = self.current_location.as_ref().and_then(|location| location.cell(position))
        else {
            return false;
        };
        self.current_cell = Some(cell.clone());
        true
    }

    /// Effective tags of the current cell; empty without one.
    pub fn current_tags(&self) -> &[String] {
        self.current_cell.as_ref().map(|cell| cell.tags.as_slice()).unwrap_or_default()
    }

    /// Registered actors standing exactly on `point`.
    pub fn characters_on_grid_point(
        &self,
        point: impl Into<GridPoint>,
        filter: GridPointFilter<'_>,
    ) -> Vec<ActorId> {
        let point = point.into();
        self.registered_characters()
            .filter(|character| character.position() == point && filter.admits(character))
            .map(|character| character.id)
            .collect()
    }

    /// Registered actors whose cell binding is `cell`.
    pub fn characters_on_cell(&self, cell: &Cell) -> Vec<ActorId> {
        self.registered_characters()
            .filter(|character| character.current_cell == Some(cell.position))
            .map(|character| character.id)
            .collect()
    }

    pub fn characters_of_type(&self, types: &[String]) -> Vec<ActorId> {
        self.registered_characters()
            .filter(|character| types.contains(&character.kind))
            .map(|character| character.id)
            .collect()
    }
}
