use super::*;
use crate::character::DamageOutcome;
use crate::dice::ScriptedDice;
use crate::game_master::GridPointFilter;
use crate::sheet::{Aspect, Stunt};
use crate::test_support::{goblin, knight, location, rulebook};
use crate::types::GridPoint;

/// Knight on the origin facing +x, goblin one step ahead, no location.
fn duel(dice: ScriptedDice) -> (Simulation, ActorId, ActorId) {
    let rulebook = rulebook();
    let knight = knight(&rulebook);
    let mut sim = Simulation::with_dice(Arc::new(rulebook), SimConfig::default(), 1, dice);
    let k = sim.spawn(knight).unwrap();
    let g = sim.spawn(goblin().at(GridPoint::new(1, 0))).unwrap();
    (sim, k, g)
}

#[test]
fn scheduled_attack_resolves_when_windup_completes() {
    let (mut sim, k, g) = duel(ScriptedDice::constant(2));
    assert!(sim.schedule_attack(k, None).unwrap());
    assert!(!sim.schedule_attack(k, None).unwrap(), "second schedule is ignored");

    sim.advance(0.25).unwrap();
    let events = sim.drain_events();
    assert_eq!(
        events,
        [
            SimEvent::AttackScheduled {
                actor: k,
                skill: "MeleeWeapons".to_string(),
                windup: 0.25,
                winddown: 0.25,
            },
            SimEvent::AttackResolved { attacker: k, targets: vec![g] },
            SimEvent::AttackRolled {
                attacker: k,
                defender: g,
                skill: "MeleeWeapons".to_string(),
                skill_value: 3,
                roll: 2,
                total: 5,
            },
            SimEvent::DefenseRolled {
                attacker: k,
                defender: g,
                skill: Some("MeleeWeapons".to_string()),
                skill_value: 1,
                roll: 2,
                total: 3,
                shifts: 2,
            },
            SimEvent::ConsequenceTaken {
                actor: g,
                consequence: "Moderate".to_string(),
                damage: 3,
            },
        ]
    );

    sim.advance(0.25).unwrap();
    assert_eq!(sim.drain_events(), [SimEvent::AttackStopped { actor: k, completed: true }]);
    assert!(!sim.actor(k).unwrap().scheduled_attack.is_active());
    assert!(sim.schedule_attack(k, None).unwrap(), "free to attack again");
}

#[test]
fn stopping_an_idle_actor_is_a_no_op() {
    let (mut sim, k, _) = duel(ScriptedDice::constant(0));
    assert!(!sim.stop_attack(k).unwrap());
    sim.schedule_attack(k, None).unwrap();
    assert!(sim.stop_attack(k).unwrap());
    assert_eq!(sim.events().last(), Some(&SimEvent::AttackStopped { actor: k, completed: false }));
}

#[test]
fn attack_shape_follows_rotation() {
    let (mut sim, k, g) = duel(ScriptedDice::constant(0));
    assert_eq!(sim.enemies_in_attack_shape(k).unwrap(), [g]);
    sim.rotate_to(k, 180.0).unwrap();
    assert!(sim.enemies_in_attack_shape(k).unwrap().is_empty());
    sim.face(k, GridPoint::new(1, 0)).unwrap();
    assert_eq!(sim.enemies_in_attack_shape(k).unwrap(), [g]);
}

#[test]
fn only_enemy_types_are_targeted() {
    let (mut sim, k, _) = duel(ScriptedDice::constant(0));
    let rulebook = rulebook();
    let squire = knight(&rulebook).at(GridPoint::new(1, 0));
    sim.spawn(squire).unwrap();
    assert_eq!(sim.enemies_in_attack_shape(k).unwrap().len(), 1, "allies are skipped");
}

#[test]
fn lopsided_defense_banks_spin_for_the_next_attack() {
    let (mut sim, k, g) = duel(ScriptedDice::new([-4, 4]));
    let outcome = sim.attack(g, k, "MeleeWeapons", None).unwrap();
    assert_eq!((outcome.attack_total, outcome.defense_total, outcome.shifts), (-3, 7, -10));
    assert_eq!(outcome.damage, None);
    assert_eq!(sim.actor(k).unwrap().spin, 5);
    assert_eq!(sim.events().last(), Some(&SimEvent::SpinGained { actor: k, amount: 5 }));
    sim.drain_events();

    let outcome = sim.attack(k, g, "MeleeWeapons", None).unwrap();
    assert_eq!(outcome.attack_total, 4);
    assert_eq!(outcome.shifts, -1);
    assert_eq!(sim.actor(k).unwrap().spin, 0, "spin is spent");
    assert_eq!(sim.actor(g).unwrap().spin, 0, "a one-shift miss gains nothing");
    assert_eq!(sim.drain_events()[0], SimEvent::SpinUsed { actor: k, amount: 5 });
}

#[test]
fn penalised_defender_defends_from_zero() {
    let (mut sim, k, g) = duel(ScriptedDice::constant(0));
    let rattled = Aspect::new("Rattled, affects #any skill.", &["MeleeWeapons", "Athletics"], -2);
    sim.game_master_mut().actor_mut(g).unwrap().aspects.push(rattled);

    let outcome = sim.attack(k, g, "MeleeWeapons", None).unwrap();
    assert_eq!((outcome.attack_total, outcome.defense_total, outcome.shifts), (3, 0, 3));
    assert!(sim.events().contains(&SimEvent::DefenseRolled {
        attacker: k,
        defender: g,
        skill: None,
        skill_value: 0,
        roll: 0,
        total: 0,
        shifts: 3,
    }));
}

#[test]
fn stunt_bonus_is_added_and_announced() {
    let (mut sim, k, g) = duel(ScriptedDice::constant(0));
    sim.game_master_mut().actor_mut(k).unwrap().stunts.push(Stunt::new("Power Strike", 2));
    let outcome = sim.attack(k, g, "MeleeWeapons", Some("Power Strike")).unwrap();
    assert_eq!(outcome.attack_total, 5);
    assert_eq!(
        sim.events()[0],
        SimEvent::StuntUsed { actor: k, stunt: "Power Strike".to_string(), bonus: 2 }
    );
}

#[test]
fn taking_out_grants_the_defender_cost_as_xp() {
    let (mut sim, k, g) = duel(ScriptedDice::constant(2));
    sim.attack(k, g, "MeleeWeapons", None).unwrap();
    let outcome = sim.attack(k, g, "MeleeWeapons", None).unwrap();
    assert_eq!(outcome.damage, Some(DamageOutcome::TakenOut { damage: 3 }));
    assert!(sim.actor(g).unwrap().is_taken_out);
    assert_eq!(sim.actor(k).unwrap().xp, 10);

    let events = sim.drain_events();
    let tail = &events[events.len() - 2..];
    assert_eq!(
        tail,
        [SimEvent::TakenOut { actor: g }, SimEvent::XpReceived { actor: k, amount: 10 }]
    );

    sim.attack(k, g, "MeleeWeapons", None).unwrap();
    assert_eq!(sim.actor(k).unwrap().xp, 10, "no XP for hitting someone already out");
}

#[test]
fn being_taken_out_interrupts_the_actor_own_attack() {
    let (mut sim, _, g) = duel(ScriptedDice::constant(0));
    sim.schedule_attack(g, None).unwrap();
    sim.apply_damage(g, 3).unwrap();
    sim.drain_events();
    sim.apply_damage(g, 3).unwrap();
    assert_eq!(
        sim.drain_events(),
        [SimEvent::AttackStopped { actor: g, completed: false }, SimEvent::TakenOut { actor: g }]
    );
    sim.advance(1.0).unwrap();
    assert!(sim.drain_events().is_empty(), "taken-out actors do not act");
}

#[test]
fn crossing_level_boundaries_grants_skill_points() {
    let (mut sim, k, _) = duel(ScriptedDice::constant(0));
    assert_eq!(sim.receive_xp(k, 400).unwrap(), 2);
    assert_eq!(
        sim.drain_events(),
        [
            SimEvent::XpReceived { actor: k, amount: 400 },
            SimEvent::LevelReached { actor: k, level: 2 },
        ]
    );
    assert_eq!(sim.actor(k).unwrap().skill_points, 2);

    sim.apply_command(&Command::LevelUpSkill { actor: k, skill: "Healing".to_string() }).unwrap();
    assert_eq!(
        sim.drain_events(),
        [SimEvent::SkillLeveled { actor: k, skill: "Healing".to_string(), rank: 0 }]
    );
    assert_eq!(sim.level_up_skill(k, "Healing").unwrap(), Some(1));
    assert_eq!(sim.actor(k).unwrap().skill_points, 0);
    assert_eq!(sim.level_up_skill(k, "MeleeWeapons").unwrap(), None, "no points left");

    let unknown = sim.level_up_skill(k, "Juggling");
    assert!(matches!(unknown, Err(CommandError::Content(ContentError::UnknownSkill(_)))));
}

#[test]
fn healing_clears_a_consequence_when_the_roll_meets_capacity() {
    let (mut sim, k, g) = duel(ScriptedDice::constant(2));
    sim.apply_damage(g, 3).unwrap();
    assert!(!sim.heal(k, g, "Mild").unwrap(), "untaken consequences are left alone");
    sim.drain_events();

    assert!(!sim.heal(k, g, "Moderate").unwrap());
    sim.game_master_mut().actor_mut(k).unwrap().skills.insert("Healing".to_string(), 2);
    assert!(sim.heal(k, g, "Moderate").unwrap());
    assert_eq!(
        sim.drain_events(),
        [
            SimEvent::Healed {
                healer: k,
                patient: g,
                consequence: "Moderate".to_string(),
                total: 2,
                success: false,
            },
            SimEvent::Healed {
                healer: k,
                patient: g,
                consequence: "Moderate".to_string(),
                total: 4,
                success: true,
            },
        ]
    );
    let goblin = sim.actor(g).unwrap();
    assert!(goblin.all_consequences().iter().all(|consequence| !consequence.is_taken));
}

#[test]
fn moves_snap_onto_cells_of_the_active_location() {
    let (mut sim, k, _) = duel(ScriptedDice::constant(0));
    let location = location(sim.rulebook());
    sim.game_master_mut().set_current_location(Some(location));

    assert_eq!(sim.move_to(k, 10000.0, 10000.0).unwrap(), GridPoint::ORIGIN);
    assert_eq!(sim.move_to(k, 1.0, 0.0).unwrap(), GridPoint::new(1, 0));
    assert_eq!(sim.move_to(k, 0.6, 1.2).unwrap(), GridPoint::new(1, 1));
    assert_eq!(sim.actor(k).unwrap().current_cell, Some(GridPoint::new(0, 1)));
    assert_eq!(
        sim.events().last(),
        Some(&SimEvent::Moved {
            actor: k,
            position: GridPoint::new(1, 1),
            cell: Some(GridPoint::new(0, 1)),
        })
    );
    assert_eq!(sim.move_to(k, f32::NAN, 3.0).unwrap(), GridPoint::ORIGIN);
}

#[test]
fn moved_actors_are_found_by_point_and_by_cell() {
    let (mut sim, k, g) = duel(ScriptedDice::constant(0));
    let location = location(sim.rulebook());
    sim.game_master_mut().set_current_location(Some(location));

    assert_eq!(sim.move_to(k, 6.0, 0.4).unwrap(), GridPoint::new(6, 0));
    assert_eq!(sim.move_to(g, 5.8, 0.0).unwrap(), GridPoint::new(6, 0));

    let gm = sim.game_master();
    assert_eq!(gm.characters_on_grid_point((6, 0), GridPointFilter::default()), [k, g]);
    assert_eq!(gm.characters_on_grid_point((6, 0), GridPointFilter::excluding(&[k])), [g]);
    let cell = gm.current_location().unwrap().cell_at(6.0, 0.0).unwrap();
    assert_eq!(cell.position, GridPoint::new(2, 0));
    assert_eq!(gm.characters_on_cell(cell), [k, g]);
    assert!(gm.characters_on_grid_point((1, 0), GridPointFilter::default()).is_empty());
}

#[test]
fn entering_a_cell_changes_the_ambient_tags() {
    let (mut sim, _, _) = duel(ScriptedDice::constant(0));
    let location = location(sim.rulebook());
    sim.game_master_mut().set_current_location(Some(location));
    assert!(sim.apply_command(&Command::EnterCell { position: GridPoint::new(0, -1) }).is_ok());
    assert_eq!(sim.game_master().current_tags(), ["mossy", "dark", "forest", "overgrown"]);
    assert!(!sim.enter_cell(GridPoint::new(5, 5)));
    assert_eq!(sim.game_master().current_cell().unwrap().position, GridPoint::new(0, -1));
}

#[test]
fn equip_commands_report_displaced_items() {
    let (mut sim, k, _) = duel(ScriptedDice::constant(0));
    let rulebook = Arc::clone(&sim.rulebook);
    let inventory = &mut sim.game_master_mut().actor_mut(k).unwrap().inventory;
    inventory.acquire(&rulebook, "Dagger", 1).unwrap();
    inventory.acquire(&rulebook, "Spear", 1).unwrap();

    assert!(!sim.equip(k, "Dagger", "MainHand").unwrap(), "dagger belongs in the off hand");
    assert!(sim.events().is_empty());
    assert!(sim.equip(k, "Spear", "MainHand").unwrap());
    assert_eq!(
        sim.drain_events(),
        [
            SimEvent::Unequipped {
                actor: k,
                item: "Shortsword".to_string(),
                slot: "MainHand".to_string(),
            },
            SimEvent::Equipped {
                actor: k,
                item: "Spear".to_string(),
                slot: "MainHand".to_string(),
            },
        ]
    );

    sim.apply_command(&Command::Unequip { actor: k, item: "Spear".to_string() }).unwrap();
    assert!(!sim.unequip(k, "Spear").unwrap());
    assert_eq!(sim.drain_events().len(), 1);
}

#[test]
fn commands_for_removed_actors_fail() {
    let (mut sim, _, g) = duel(ScriptedDice::constant(0));
    sim.game_master_mut().remove(g);
    let result = sim.apply_command(&Command::MoveTo { actor: g, x: 0.0, y: 0.0 });
    assert!(matches!(result, Err(CommandError::UnknownActor(id)) if id == g));
}

#[test]
fn advance_ignores_negative_and_non_finite_steps() {
    let (mut sim, k, _) = duel(ScriptedDice::constant(0));
    sim.schedule_attack(k, None).unwrap();
    sim.advance(-1.0).unwrap();
    sim.advance(f32::INFINITY).unwrap();
    assert_eq!(sim.current_tick(), 2);
    assert_eq!(sim.actor(k).unwrap().scheduled_attack.current_time(), 0.0);
}

#[test]
fn snapshot_hash_tracks_state() {
    let run = |seed: u64| {
        let rulebook = rulebook();
        let knight = knight(&rulebook);
        let mut sim = Simulation::new(Arc::new(rulebook), SimConfig::default(), seed);
        let k = sim.spawn(knight).unwrap();
        sim.spawn(goblin().at(GridPoint::new(1, 0))).unwrap();
        sim.apply_command(&Command::ScheduleAttack { actor: k, skill: None }).unwrap();
        sim.apply_command(&Command::Advance { seconds: 0.25 }).unwrap();
        sim.snapshot_hash()
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(43));

    let (mut sim, k, _) = duel(ScriptedDice::constant(0));
    let before = sim.snapshot_hash();
    sim.rotate_to(k, 90.0).unwrap();
    assert_ne!(before, sim.snapshot_hash());
}

#[test]
fn snapshot_hash_covers_unequipped_armor() {
    let (mut sim, k, _) = duel(ScriptedDice::constant(0));
    assert!(sim.unequip(k, "Leather Armor").unwrap());
    let before = sim.snapshot_hash();

    let knight = sim.game_master_mut().actor_mut(k).unwrap();
    let armor = knight.inventory.item_mut("Leather Armor").unwrap();
    armor.consequences_mut()[0].take(Aspect::new("Dented", &[], 0));
    assert!(sim.actor(k).unwrap().all_consequences().iter().all(|c| !c.is_taken));
    assert_ne!(before, sim.snapshot_hash());
}
