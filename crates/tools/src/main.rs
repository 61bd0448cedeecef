use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crawler_core::{CommandJournal, ReplayResult, Rulebook, Scenario, SimConfig, replay};

/// Replays a command journal against a scenario
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rulebook JSON (skills, cell blueprints, items)
    #[arg(short, long)]
    rulebook: PathBuf,
    /// Scenario JSON the journal was recorded on
    #[arg(short, long)]
    scenario: PathBuf,
    /// Journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Optional TOML rule settings; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
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

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let journal: CommandJournal =
        serde_json::from_str(&journal_data).context("Failed to deserialize journal JSON")?;

    log::info!("replaying {} record(s) with seed {}", journal.records.len(), journal.seed);
    let result: ReplayResult = replay(Arc::new(rulebook), config, &scenario, &journal)
        .context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Final Tick: {}", result.final_tick);
    println!("Snapshot Hash: {}", result.snapshot_hash);
    if result.taken_out.is_empty() {
        println!("Taken Out: none");
    } else {
        println!("Taken Out: {}", result.taken_out.join(", "));
    }

    Ok(())
}
