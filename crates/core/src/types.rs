use glam::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ActorId;
}

/// Integer grid coordinate. `y` grows upwards.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for GridPoint {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

/// Appends every tag of `extra` that `tags` does not hold yet, keeping first-appearance order.
pub fn merge_tags(tags: &mut Vec<String>, extra: &[String]) {
    for tag in extra {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
}

pub fn tag_union(first: &[String], second: &[String]) -> Vec<String> {
    let mut tags = Vec::with_capacity(first.len() + second.len());
    merge_tags(&mut tags, first);
    merge_tags(&mut tags, second);
    tags
}

#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    AttackScheduled { actor: ActorId, skill: String, windup: f32, winddown: f32 },
    AttackStopped { actor: ActorId, completed: bool },
    AttackResolved { attacker: ActorId, targets: Vec<ActorId> },
    AttackRolled {
        attacker: ActorId,
        defender: ActorId,
        skill: String,
        skill_value: i32,
        roll: i32,
        total: i32,
    },
    DefenseRolled {
        attacker: ActorId,
        defender: ActorId,
        skill: Option<String>,
        skill_value: i32,
        roll: i32,
        total: i32,
        shifts: i32,
    },
    StuntUsed { actor: ActorId, stunt: String, bonus: i32 },
    SpinUsed { actor: ActorId, amount: i32 },
    SpinGained { actor: ActorId, amount: i32 },
    PhysicalStressChanged { actor: ActorId, amount: i32, stress: i32 },
    ConsequenceTaken { actor: ActorId, consequence: String, damage: i32 },
    TakenOut { actor: ActorId },
    XpReceived { actor: ActorId, amount: u32 },
    LevelReached { actor: ActorId, level: u32 },
    SkillLeveled { actor: ActorId, skill: String, rank: u32 },
    Healed { healer: ActorId, patient: ActorId, consequence: String, total: i32, success: bool },
    Moved { actor: ActorId, position: GridPoint, cell: Option<GridPoint> },
    Rotated { actor: ActorId, rotation: f32 },
    Equipped { actor: ActorId, item: String, slot: String },
    Unequipped { actor: ActorId, item: String, slot: String },
}
