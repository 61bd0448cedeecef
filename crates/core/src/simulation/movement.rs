//! Movement and rotation. Targets are snapped, never rejected.

use super::*;
use crate::geometry::heading_towards;
use crate::types::GridPoint;

/// Largest magnitude a rounded coordinate may have and still fit an `i32`.
const COORDINATE_LIMIT: f32 = 2_147_483_520.0;

impl Simulation {
    /// Nearest valid grid point for `(x, y)`. Non-finite or out-of-range input falls back
    /// to the origin, as does a point with no cell under it while a location is active.
    pub fn snap_to_grid(&self, x: f32, y: f32) -> GridPoint {
        if !x.is_finite() || !y.is_finite() {
            return GridPoint::ORIGIN;
        }
        let (x, y) = (x.round(), y.round());
        if x.abs() > COORDINATE_LIMIT || y.abs() > COORDINATE_LIMIT {
            return GridPoint::ORIGIN;
        }
        let point = GridPoint::new(x as i32, y as i32);
        match self.game_master.current_location() {
            Some(location) if location.cell_at_point(point).is_none() => GridPoint::ORIGIN,
            _ => point,
        }
    }

    /// Moves the actor onto the snapped target and rebinds its current cell.
    pub fn move_to(&mut self, actor: ActorId, x: f32, y: f32) -> Result<GridPoint, CommandError> {
        self.character(actor)?;
        let (position, cell) = self.place(actor, x, y);
        self.events.push(SimEvent::Moved { actor, position, cell });
        Ok(position)
    }

    /// Sets position and cell binding without raising an event. Unknown actors are ignored.
    pub(super) fn place(
        &mut self,
        actor: ActorId,
        x: f32,
        y: f32,
    ) -> (GridPoint, Option<GridPoint>) {
        let position = self.snap_to_grid(x, y);
        let cell = self
            .game_master
            .current_location()
            .and_then(|location| location.cell_at_point(position))
            .map(|cell| cell.position);
        if let Some(character) = self.game_master.actor_mut(actor) {
            character.transform.position = position;
            character.current_cell = cell;
        }
        (position, cell)
    }

    /// Rotation in degrees counter-clockwise from +x, normalised into `[0, 360)`.
    pub fn rotate_to(&mut self, actor: ActorId, degrees: f32) -> Result<f32, CommandError> {
        let character = self.character_mut(actor)?;
        character.transform.set_rotation(degrees);
        let rotation = character.transform.rotation;
        self.events.push(SimEvent::Rotated { actor, rotation });
        Ok(rotation)
    }

    /// Turns the actor towards `target`. Standing on the target keeps the current rotation.
    pub fn face(&mut self, actor: ActorId, target: GridPoint) -> Result<f32, CommandError> {
        let position = self.character(actor)?.position();
        if position == target {
            return Ok(self.character(actor)?.transform.rotation);
        }
        self.rotate_to(actor, heading_towards(position, target))
    }

    /// Makes the active location's cell at `position` the current cell.
    pub fn enter_cell(&mut self, position: GridPoint) -> bool {
        let entered = self.game_master.enter_cell(position);
        if entered {
            log::debug!("entered cell {position:?}, tags {:?}", self.game_master.current_tags());
        }
        entered
    }
}
