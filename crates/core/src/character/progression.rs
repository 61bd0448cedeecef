//! Experience, levels and skill ranks.

use super::*;

/// XP scale of the level curve: level = floor(sqrt(xp / step)).
pub const XP_PER_LEVEL_STEP: u32 = 100;

impl Character {
    pub fn level(&self) -> u32 {
        (self.xp / XP_PER_LEVEL_STEP).isqrt()
    }

    /// Adds XP and one skill point per level crossed. Returns the number of levels gained.
    pub fn receive_xp(&mut self, amount: u32) -> u32 {
        let before = self.level();
        self.xp = self.xp.saturating_add(amount);
        let gained = self.level() - before;
        self.skill_points += gained;
        gained
    }

    /// Point cost of the next rank: 1 to learn a new skill, `rank + 1` otherwise.
    pub fn skill_rank_cost(&self, skill: &str) -> u32 {
        self.skill_rank(skill).map_or(1, |rank| rank + 1)
    }

    /// Learns `skill` at rank 0, or raises it by one rank, if enough points are unspent.
    /// Returns the new rank.
    pub fn level_up_skill(&mut self, skill: &str) -> Option<u32> {
        let cost = self.skill_rank_cost(skill);
        if self.skill_points < cost {
            return None;
        }
        let rank = self.skill_rank(skill).map_or(0, |rank| rank + 1);
        self.skill_points -= cost;
        self.skills.insert(skill.to_string(), rank);
        Some(rank)
    }
}
