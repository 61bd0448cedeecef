mod common;

use common::scripted_camp;
use crawler_core::dice::ScriptedDice;
use crawler_core::{Command, SimEvent, summarize};

#[test]
fn one_swing_resolves_against_every_enemy_in_the_sweep() {
    let (mut sim, ids) = scripted_camp(ScriptedDice::constant(0));
    let (knight, snik, grub) = (ids[0], ids[1], ids[2]);
    sim.apply_command(&Command::MoveTo { actor: grub, x: 1.0, y: 1.0 }).unwrap();
    sim.drain_events();

    sim.apply_command(&Command::ScheduleAttack { actor: knight, skill: None }).unwrap();
    sim.apply_command(&Command::Advance { seconds: 0.25 }).unwrap();
    let events = sim.drain_events();

    let resolved = SimEvent::AttackResolved { attacker: knight, targets: vec![snik, grub] };
    assert!(events.contains(&resolved));
    assert!(events.contains(&SimEvent::ConsequenceTaken {
        actor: snik,
        consequence: "Moderate".to_string(),
        damage: 3,
    }));
    let grazed = SimEvent::PhysicalStressChanged { actor: grub, amount: 2, stress: 2 };
    assert!(events.contains(&grazed));
}

#[test]
fn turning_away_swings_at_nothing() {
    let (mut sim, ids) = scripted_camp(ScriptedDice::constant(0));
    let knight = ids[0];
    sim.apply_command(&Command::RotateTo { actor: knight, degrees: 180.0 }).unwrap();
    sim.apply_command(&Command::ScheduleAttack { actor: knight, skill: None }).unwrap();
    sim.drain_events();

    sim.apply_command(&Command::Advance { seconds: 0.25 }).unwrap();
    let resolved = SimEvent::AttackResolved { attacker: knight, targets: vec![] };
    assert_eq!(sim.drain_events(), [resolved]);
}

#[test]
fn armor_soaks_a_hit_before_stress() {
    let (mut sim, ids) = scripted_camp(ScriptedDice::new([1, -2]));
    let (knight, grub) = (ids[0], ids[2]);
    sim.apply_command(&Command::MoveTo { actor: grub, x: 1.0, y: 1.0 }).unwrap();
    sim.apply_command(&Command::RotateTo { actor: grub, degrees: 225.0 }).unwrap();
    sim.drain_events();

    let outcome = sim.attack(grub, knight, "MeleeWeapons", None).unwrap();
    assert_eq!(outcome.shifts, 2);
    assert_eq!(
        sim.events().last(),
        Some(&SimEvent::PhysicalStressChanged { actor: knight, amount: 1, stress: 1 })
    );
}

#[test]
fn duel_with_spin_ends_in_a_take_out() {
    let (mut sim, ids) = scripted_camp(ScriptedDice::constant(0));
    let (knight, snik) = (ids[0], ids[1]);
    sim.apply_command(&Command::ScheduleAttack { actor: knight, skill: None }).unwrap();
    sim.apply_command(&Command::ScheduleAttack { actor: snik, skill: None }).unwrap();

    // Knight lands first; Snik's slower swing is defended well enough to bank spin.
    sim.apply_command(&Command::Advance { seconds: 0.25 }).unwrap();
    sim.apply_command(&Command::Advance { seconds: 0.25 }).unwrap();
    assert_eq!(sim.actor(knight).unwrap().spin, 1);
    let events = sim.drain_events();
    assert!(events.contains(&SimEvent::AttackStopped { actor: knight, completed: true }));
    assert!(events.contains(&SimEvent::SpinGained { actor: knight, amount: 1 }));

    sim.apply_command(&Command::ScheduleAttack { actor: knight, skill: None }).unwrap();
    sim.apply_command(&Command::Advance { seconds: 0.25 }).unwrap();
    let events = sim.drain_events();
    assert!(events.contains(&SimEvent::SpinUsed { actor: knight, amount: 1 }));
    let tail = &events[events.len() - 3..];
    assert_eq!(
        tail,
        [
            SimEvent::AttackStopped { actor: snik, completed: false },
            SimEvent::TakenOut { actor: snik },
            SimEvent::XpReceived { actor: knight, amount: 10 },
        ]
    );

    let knight = sim.actor(knight).unwrap();
    assert_eq!((knight.spin, knight.xp), (0, 10));
    assert_eq!(summarize(&sim).taken_out, ["Snik"]);
}
