//! Wildhex - Headless Runner
//!
//! Plays a seeded session: each turn the hatchling hunts the most promising
//! adjacent creature, then wanders to a random visible neighbor. Prints a
//! summary as text or JSON.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wildhex::combat::{assess_hunt, Diagnostics};
use wildhex::core::error::Result;
use wildhex::core::types::CreatureId;
use wildhex::core::WildConfig;
use wildhex::hex::AxialCoord;
use wildhex::world::{WorldAction, WorldEngine, WorldSnapshot};

/// Only hunts at least this likely to succeed are attempted
const HUNT_THRESHOLD: u32 = 60;

/// Wildhex headless runner
#[derive(Parser, Debug)]
#[command(name = "wildhex")]
#[command(about = "Play a seeded wilderness session and print a summary")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before stopping
    #[arg(long, default_value_t = 200)]
    turns: u32,

    /// Config file (TOML); missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

/// Session summary
#[derive(Serialize)]
struct SessionSummary {
    seed: u64,
    turns: u32,
    moves: u32,
    hexes: usize,
    discovered: usize,
    visited: usize,
    hunts: u32,
    kills: u32,
    creatures_alive: usize,
    final_weight: f64,
    stage: String,
    health: f64,
    energy: f64,
    end: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wildhex=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => WildConfig::load(path)?,
        None => WildConfig::default(),
    };
    let engine = WorldEngine::with_defaults(config)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!("Starting session with seed {}", seed);

    let (mut world, startup) = engine.start(&mut rng)?;
    tracing::debug!(
        "Startup: {} hexes generated, {} creatures spawned",
        startup.generated_hexes(),
        startup.spawned()
    );
    let mut hunts = 0;
    let mut end = String::from("turn limit");

    while world.turn < args.turns {
        if let Some(id) = pick_prey(&engine, &world, &mut rng) {
            world = engine.dispatch(&world, WorldAction::Hunt(id), &mut rng).snapshot;
            hunts += 1;
        }
        if let Some(cause) = &world.end_cause {
            end = cause.to_string();
            break;
        }

        let Some(target) = pick_step(&world, &mut rng) else {
            end = String::from("stranded");
            break;
        };
        let moved = engine.dispatch(&world, WorldAction::MovePlayer(target), &mut rng);
        let spawn_pending = match &moved.outcome {
            Ok(report) => report.spawn_pending,
            Err(rejection) => {
                end = rejection.to_string();
                break;
            }
        };
        world = moved.snapshot;
        if spawn_pending {
            world = engine
                .dispatch(&world, WorldAction::SpawnCreatures, &mut rng)
                .snapshot;
        }
        if let Some(cause) = &world.end_cause {
            end = cause.to_string();
            break;
        }
    }

    let visibility = world.visibility_summary();
    let summary = SessionSummary {
        seed,
        turns: world.turn,
        moves: world.moves,
        hexes: visibility.total,
        discovered: visibility.discovered,
        visited: visibility.visited,
        hunts,
        kills: world.player.kills,
        creatures_alive: world.creature_count(),
        final_weight: world.player.weight,
        stage: world.player.stage.to_string(),
        health: world.player.health,
        energy: world.player.energy,
        end,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        "text" => print_text(&summary),
        other => {
            eprintln!("Unknown format '{}', defaulting to text", other);
            print_text(&summary);
        }
    }

    Ok(())
}

/// Adjacent creature with the best odds, if any clears the threshold
fn pick_prey<R: Rng>(engine: &WorldEngine, world: &WorldSnapshot, rng: &mut R) -> Option<CreatureId> {
    let player = &world.player;
    let mut best: Option<(CreatureId, u32)> = None;
    for creature in world.creatures_sorted() {
        if player.position.distance(&creature.coord) > 1 {
            continue;
        }
        let Some(species) = engine.registry.get(&creature.species) else {
            continue;
        };
        let mut diag = Diagnostics::new();
        let odds = assess_hunt(
            player.weight,
            player.fitness,
            species,
            creature.size,
            creature.pack_size,
            &engine.config,
            rng,
            &mut diag,
        );
        if odds.success_chance >= HUNT_THRESHOLD
            && best.map_or(true, |(_, chance)| odds.success_chance > chance)
        {
            best = Some((creature.id, odds.success_chance));
        }
    }
    best.map(|(id, _)| id)
}

/// Random visible, passable neighbor of the player
fn pick_step<R: Rng>(world: &WorldSnapshot, rng: &mut R) -> Option<AxialCoord> {
    let options: Vec<AxialCoord> = world
        .player
        .position
        .neighbors()
        .into_iter()
        .filter(|n| {
            world
                .hex(*n)
                .is_some_and(|h| h.visible && h.terrain.is_passable())
        })
        .collect();
    if options.is_empty() {
        return None;
    }
    Some(options[rng.gen_range(0..options.len())])
}

fn print_text(summary: &SessionSummary) {
    println!("Wildhex Session");
    println!("===============");
    println!("Ended: {}", summary.end);
    println!("Turns: {} ({} moves)", summary.turns, summary.moves);
    println!(
        "Hexes: {} generated, {} discovered, {} visited",
        summary.hexes, summary.discovered, summary.visited
    );
    println!("Hunts: {} attempted, {} kills", summary.hunts, summary.kills);
    println!("Creatures alive: {}", summary.creatures_alive);
    println!();
    println!(
        "Player: {:.3} kg {} (health {:.0}, energy {:.0})",
        summary.final_weight, summary.stage, summary.health, summary.energy
    );
    println!("Seed: {}", summary.seed);
}
