//! Attack geometry and the per-actor attack timeline.
//!
//! A weapon describes where it hits with one or more circle sectors
//! (`AttackShapeMarker`) stored in attacker-local space. The `AttackMarker` holds the
//! single in-flight attack of an actor: a wind-up phase that ends with the hit, then a
//! wind-down phase before the actor is free again.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{angle_between, rotate_vector};
use crate::types::GridPoint;

pub const DEFAULT_SHAPE_RADIUS: f32 = 1.0;
pub const DEFAULT_SHAPE_ANGLE: f32 = 45.0;
const ANGLE_TOLERANCE_DEGREES: f32 = 0.06;

/// Circle sector swept by an attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackShapeMarker {
    /// Sector apex relative to the attacker, before rotation.
    #[serde(default)]
    pub offset: GridPoint,
    pub radius: f32,
    /// Full opening angle in degrees.
    pub angle: f32,
    #[serde(skip, default = "initial_forward")]
    forward: Vec2,
}

fn initial_forward() -> Vec2 {
    Vec2::X
}

impl Default for AttackShapeMarker {
    fn default() -> Self {
        Self::new(GridPoint::ORIGIN, DEFAULT_SHAPE_RADIUS, DEFAULT_SHAPE_ANGLE)
    }
}

impl AttackShapeMarker {
    pub fn new(offset: GridPoint, radius: f32, angle: f32) -> Self {
        Self { offset, radius, angle, forward: initial_forward() }
    }

    pub fn area(&self) -> f32 {
        PI * self.radius * self.radius * (self.angle / 360.0)
    }

    pub fn forward(&self) -> Vec2 {
        self.forward
    }

    /// Orients the template with the attacker's rotation. Must run before `contains`.
    pub fn apply(&mut self, rotation: f32) {
        self.forward = rotate_vector(Vec2::X, rotation, false);
    }

    /// Whether `point` lies in the sector anchored at `origin`. `slack` widens the
    /// radius, typically by the target's own radius.
    pub fn contains(&self, origin: GridPoint, point: GridPoint, slack: f32) -> bool {
        let apex = origin.as_vec2() + self.forward.rotate(self.offset.as_vec2());
        let to_point = point.as_vec2() - apex;
        let reach = self.radius + slack;
        if to_point.length_squared() > reach * reach {
            return false;
        }
        if to_point == Vec2::ZERO {
            return true;
        }
        let degrees = angle_between(self.forward, to_point).to_degrees();
        degrees <= self.angle * 0.5 + ANGLE_TOLERANCE_DEGREES
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackPhase {
    Idle,
    Windup,
    Winddown,
}

/// The attack an actor is currently performing, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttackMarker {
    shape: Vec<AttackShapeMarker>,
    skill: String,
    pre_time: f32,
    post_time: f32,
    current_time: f32,
    hit_occurred: bool,
    is_active: bool,
}

impl AttackMarker {
    pub fn start(
        &mut self,
        shape: Vec<AttackShapeMarker>,
        skill: impl Into<String>,
        pre_time: f32,
        post_time: f32,
    ) {
        self.shape = shape;
        self.skill = skill.into();
        self.pre_time = pre_time;
        self.post_time = post_time;
        self.current_time = 0.0;
        self.hit_occurred = false;
        self.is_active = true;
    }

    pub fn stop(&mut self) {
        self.current_time = 0.0;
        self.is_active = false;
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn hit_occurred(&self) -> bool {
        self.hit_occurred
    }

    pub fn skill(&self) -> &str {
        &self.skill
    }

    pub fn shape(&self) -> &[AttackShapeMarker] {
        &self.shape
    }

    pub fn pre_time(&self) -> f32 {
        self.pre_time
    }

    pub fn post_time(&self) -> f32 {
        self.post_time
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn total_time(&self) -> f32 {
        self.pre_time + self.post_time
    }

    pub fn phase(&self) -> AttackPhase {
        if !self.is_active {
            AttackPhase::Idle
        } else if self.current_time < self.pre_time {
            AttackPhase::Windup
        } else {
            AttackPhase::Winddown
        }
    }

    pub fn is_finished(&self) -> bool {
        self.is_active && self.current_time >= self.total_time()
    }

    /// Moves the timeline forward. Returns `true` on the single step where the wind-up
    /// completes and the hit has to be resolved.
    pub fn advance(&mut self, seconds: f32) -> bool {
        if !self.is_active {
            return false;
        }
        self.current_time += seconds.max(0.0);
        if !self.hit_occurred && self.current_time >= self.pre_time {
            self.hit_occurred = true;
            return true;
        }
        false
    }

    /// Copy of the scheduled shape oriented with `rotation`.
    pub fn applied_shape(&self, rotation: f32) -> Vec<AttackShapeMarker> {
        self.shape
            .iter()
            .cloned()
            .map(|mut shape| {
                shape.apply(rotation);
                shape
            })
            .collect()
    }

    /// Position in the two-phase timeline: `[0, 0.5]` winding up, `[0.5, 1]` winding down.
    pub fn progress(&self) -> f32 {
        if !self.is_active {
            return 0.0;
        }
        let progress = if self.current_time <= self.pre_time {
            if self.pre_time > 0.0 { self.current_time / self.pre_time * 0.5 } else { 0.5 }
        } else if self.post_time > 0.0 {
            0.5 + (self.current_time - self.pre_time) / self.post_time * 0.5
        } else {
            1.0
        };
        progress.clamp(0.0, 1.0)
    }
}
