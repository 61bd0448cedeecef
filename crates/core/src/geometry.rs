//! Plane geometry for actor transforms and attack shapes.
//! Rotations are in degrees, counter-clockwise from the +x axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::GridPoint;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: GridPoint,
    #[serde(default)]
    pub rotation: f32,
}

impl Transform {
    pub const fn new(position: GridPoint, rotation: f32) -> Self {
        Self { position, rotation }
    }

    pub fn forward(&self) -> Vec2 {
        rotate_vector(Vec2::X, self.rotation, false)
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }
}

/// Maps any finite angle into `[0, 360)`; non-finite input becomes 0.
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 { 0.0 } else { normalized }
}

pub fn rotate_vector(vector: Vec2, degrees: f32, clockwise: bool) -> Vec2 {
    let radians = degrees.to_radians();
    let radians = if clockwise { -radians } else { radians };
    Vec2::from_angle(radians).rotate(vector)
}

/// Unsigned angle between two vectors, in radians within `[0, π]`.
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to)).abs()
}

/// Rotation in degrees that makes `from` face `to`; zero when both coincide.
pub fn heading_towards(from: GridPoint, to: GridPoint) -> f32 {
    let delta = to.as_vec2() - from.as_vec2();
    if delta == Vec2::ZERO {
        return 0.0;
    }
    normalize_degrees(delta.y.atan2(delta.x).to_degrees())
}
