//! Randomness source for every roll in the simulation.
//! Rolls go through the `Dice` trait so tests can script exact outcomes.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::config::DiceRange;

pub trait Dice {
    fn roll(&mut self) -> i32;
}

/// Uniform integer rolls over an inclusive range, reproducible from a seed.
pub struct SeededDice {
    rng: ChaCha8Rng,
    min: i32,
    max: i32,
}

impl SeededDice {
    pub fn new(seed: u64, range: DiceRange) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min: range.min.min(range.max),
            max: range.max.max(range.min),
        }
    }

    pub fn range(&self) -> DiceRange {
        DiceRange { min: self.min, max: self.max }
    }
}

impl Dice for SeededDice {
    fn roll(&mut self) -> i32 {
        let span = (i64::from(self.max) - i64::from(self.min) + 1) as u64;
        let offset = (self.rng.next_u64() % span) as i64;
        (i64::from(self.min) + offset) as i32
    }
}

/// Replays a fixed sequence of rolls, starting over when it runs out.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: Vec<i32>,
    next: usize,
}

impl ScriptedDice {
    pub fn new(rolls: impl Into<Vec<i32>>) -> Self {
        Self { rolls: rolls.into(), next: 0 }
    }

    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> i32 {
        if self.rolls.is_empty() {
            return 0;
        }
        let value = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        value
    }
}
