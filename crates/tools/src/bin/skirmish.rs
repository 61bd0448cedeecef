use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use crawler_core::geometry::heading_towards;
use crawler_core::{
    ActorId, Command, CommandJournal, GridPoint, Rulebook, Scenario, SimConfig, Simulation,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Seeded random skirmish with invariant checks
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    #[arg(short, long)]
    rulebook: PathBuf,
    #[arg(short, long)]
    scenario: PathBuf,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the commands issued during the run as a replayable journal
    #[arg(long)]
    record: Option<PathBuf>,
}

#[derive(Clone, Copy)]
enum Action {
    Attack,
    Approach,
    Face,
    Wait,
}

// Bias to attack
const ACTIONS: [Action; 5] =
    [Action::Attack, Action::Attack, Action::Approach, Action::Face, Action::Wait];

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn nearest_enemy(sim: &Simulation, id: ActorId) -> Option<GridPoint> {
    let actor = sim.actor(id)?;
    let position = actor.position();
    sim.game_master()
        .characters_of_type(&actor.enemies)
        .into_iter()
        .filter_map(|enemy| sim.actor(enemy))
        .filter(|enemy| !enemy.is_taken_out)
        .map(|enemy| enemy.position())
        .min_by_key(|target| {
            let (dx, dy) = (i64::from(target.x - position.x), i64::from(target.y - position.y));
            dx * dx + dy * dy
        })
}

/// Kinds that still have someone standing.
fn standing_sides(sim: &Simulation) -> BTreeSet<String> {
    sim.game_master()
        .registered_characters()
        .filter(|character| !character.is_taken_out)
        .map(|character| character.kind.clone())
        .collect()
}

fn check_invariants(sim: &Simulation, stress_at_take_out: &BTreeMap<ActorId, i32>) -> Result<()> {
    let location = sim.game_master().current_location();
    for actor in sim.game_master().registered_characters() {
        let stress = actor.physical_stress;
        ensure!(
            (stress.min..=stress.max).contains(&stress.value),
            "{}: stress {} outside [{}, {}]",
            actor.name,
            stress.value,
            stress.min,
            stress.max
        );
        if let Some(frozen) = stress_at_take_out.get(&actor.id) {
            ensure!(stress.value == *frozen, "{}: gained stress after being taken out", actor.name);
        }
        if let Some(location) = location {
            let position = actor.position();
            ensure!(
                position == GridPoint::ORIGIN || location.cell_at_point(position).is_some(),
                "{}: standing on {position:?}, which has no cell",
                actor.name
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rulebook = Rulebook::load(&args.rulebook)
        .with_context(|| format!("Failed to load rulebook: {}", args.rulebook.display()))?;
    let scenario = Scenario::load(&args.scenario, &rulebook)
        .with_context(|| format!("Failed to load scenario: {}", args.scenario.display()))?;
    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SimConfig::default(),
    };
    let tick_seconds = config.tick_seconds;

    println!("Starting skirmish on seed {} for max {} ticks...", args.seed, args.ticks);
    let mut sim = Simulation::new(Arc::new(rulebook), config, args.seed);
    let ids = scenario.install(&mut sim).context("Failed to install scenario")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed ^ 0x5eed);
    let mut journal = CommandJournal::new(args.seed);
    let mut stress_at_take_out = BTreeMap::new();

    for _ in 0..args.ticks {
        if standing_sides(&sim).len() < 2 {
            break;
        }
        for &id in &ids {
            let Some(actor) = sim.actor(id) else { continue };
            if actor.is_taken_out || actor.scheduled_attack.is_active() {
                continue;
            }
            let position = actor.position();
            let Some(target) = nearest_enemy(&sim, id) else { continue };
            let command = match choose(&mut rng, &ACTIONS) {
                Action::Attack => Command::ScheduleAttack { actor: id, skill: None },
                Action::Approach => Command::MoveTo {
                    actor: id,
                    x: (position.x + (target.x - position.x).signum()) as f32,
                    y: (position.y + (target.y - position.y).signum()) as f32,
                },
                Action::Face if target != position => {
                    Command::RotateTo { actor: id, degrees: heading_towards(position, target) }
                }
                Action::Face | Action::Wait => continue,
            };
            sim.apply_command(&command).context("skirmish issued an invalid command")?;
            journal.append(command);
        }

        let advance = Command::Advance { seconds: tick_seconds };
        sim.apply_command(&advance).context("advance failed")?;
        journal.append(advance);

        for actor in sim.game_master().registered_characters() {
            if actor.is_taken_out {
                stress_at_take_out.entry(actor.id).or_insert(actor.physical_stress.value);
            }
        }
        check_invariants(&sim, &stress_at_take_out)?;
        sim.drain_events();
    }

    let standing = standing_sides(&sim);
    println!(
        "Stopped at tick {} with {} standing, snapshot hash {}",
        sim.current_tick(),
        standing.into_iter().collect::<Vec<_>>().join(", "),
        sim.snapshot_hash()
    );

    if let Some(path) = &args.record {
        let text = serde_json::to_string_pretty(&journal).context("Failed to serialize journal")?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write journal: {}", path.display()))?;
        println!("Journal written to {}", path.display());
    }

    println!("Skirmish completed successfully.");
    Ok(())
}
