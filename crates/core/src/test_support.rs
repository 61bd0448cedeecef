//! Shared fixtures for the unit test suites.
//! This module exists to keep rulebook, map and actor setup out of individual tests.
//! It does not own production logic.

use crate::character::Character;
use crate::location::Location;
use crate::rulebook::Rulebook;
use crate::sheet::Consequence;

pub(crate) const RULEBOOK_JSON: &str = include_str!("../tests/fixtures/rulebook.json");
pub(crate) const LOCATION_JSON: &str = include_str!("../tests/fixtures/location.json");
pub(crate) const SCENARIO_JSON: &str = include_str!("../tests/fixtures/scenario.json");

pub(crate) fn rulebook() -> Rulebook {
    Rulebook::from_json(RULEBOOK_JSON).expect("fixture rulebook should load")
}

/// Plus-shaped forest crossroads.
pub(crate) fn location(rulebook: &Rulebook) -> Location {
    Location::from_json(LOCATION_JSON, rulebook).expect("fixture location should load")
}

pub(crate) fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Shortsword and leather armor, hunting goblins. Build cost 18.
pub(crate) fn knight(rulebook: &Rulebook) -> Character {
    let mut knight = Character::new("Knight", "Sir Roderick", 3)
        .with_skill("MeleeWeapons", 3)
        .with_skill("Athletics", 1)
        .with_tags(&["armored"])
        .with_enemies(&["Goblin"])
        .with_slots(&["MainHand", "OffHand", "Body"])
        .with_consequence(Consequence::new("Mild", 2))
        .with_consequence(Consequence::new("Moderate", 4));
    knight.inventory.acquire(rulebook, "Shortsword", 1).expect("shortsword exists");
    knight.inventory.acquire(rulebook, "Leather Armor", 1).expect("armor exists");
    assert!(knight.equip("Shortsword", "MainHand"));
    assert!(knight.equip("Leather Armor", "Body"));
    knight
}

/// Unarmed, unarmored. Build cost 10.
pub(crate) fn goblin() -> Character {
    Character::new("Goblin", "Snik", 2)
        .with_skill("MeleeWeapons", 1)
        .with_skill("Athletics", 1)
        .with_tags(&["sneaky"])
        .with_enemies(&["Knight"])
        .with_consequence(Consequence::new("Mild", 2))
        .with_consequence(Consequence::new("Moderate", 4))
}
