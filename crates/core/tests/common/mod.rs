//! Fixture loading shared by the integration suites.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use crawler_core::dice::Dice;
use crawler_core::{ActorId, Rulebook, Scenario, SimConfig, Simulation};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

pub fn rulebook() -> Arc<Rulebook> {
    Arc::new(Rulebook::load(&fixture("rulebook.json")).expect("fixture rulebook should load"))
}

pub fn scenario(rulebook: &Rulebook) -> Scenario {
    Scenario::load(&fixture("scenario.json"), rulebook).expect("fixture scenario should load")
}

/// Goblin camp with a seeded dice source. Ids are knight, Snik, Grub.
pub fn goblin_camp(seed: u64) -> (Simulation, Vec<ActorId>) {
    let rulebook = rulebook();
    let scenario = scenario(&rulebook);
    let mut sim = Simulation::new(rulebook, SimConfig::default(), seed);
    let ids = scenario.install(&mut sim).expect("scenario should install");
    (sim, ids)
}

/// Goblin camp with scripted rolls.
pub fn scripted_camp(dice: impl Dice + 'static) -> (Simulation, Vec<ActorId>) {
    let rulebook = rulebook();
    let scenario = scenario(&rulebook);
    let mut sim = Simulation::with_dice(rulebook, SimConfig::default(), 0, dice);
    let ids = scenario.install(&mut sim).expect("scenario should install");
    (sim, ids)
}
