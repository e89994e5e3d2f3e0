//! Plateau Sync - CLI
//!
//! Replays recorded client event logs through the turn-sync core.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use plateau_sync::{GameSnapshot, Replay, SyncConfig, Tile, TurnSync, read_event_log};
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            events,
            config,
            json,
        } => run_replay(events, config, json),
        Command::Tile { path } => run_tile(&path),
    }
}

/// Replay an event log
#[instrument]
fn run_replay(events: PathBuf, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = match config {
        Some(path) => SyncConfig::from_file(path)?,
        None => SyncConfig::default(),
    };
    let sync = TurnSync::new(config);

    let events = read_event_log(&events)?;
    info!(count = events.len(), "Replaying events");

    let replay = Replay::run(&sync, GameSnapshot::new(), events);

    if json {
        println!("{}", serde_json::to_string_pretty(&replay)?);
    } else {
        for step in replay.steps() {
            println!(
                "{:>4}  {:<18} turn={:<3} my_turn={:<5} dead={:<5} -> {}",
                step.index(),
                step.event(),
                step.snapshot().current_turn_number(),
                step.snapshot().my_turn(),
                step.dead(),
                step.command()
            );
        }
    }

    let dead = replay.dead_steps();
    if !dead.is_empty() {
        warn!(steps = ?dead, "Replay passed through dead states");
    }
    if replay.ends_dead() {
        anyhow::bail!("Replay ended in a dead state");
    }
    Ok(())
}

/// Decode a tile path
#[instrument]
fn run_tile(path: &str) -> Result<()> {
    let tile = Tile::parse(path).ok_or_else(|| anyhow::anyhow!("Not a tile path: {}", path))?;
    let (a, b, c) = tile.faces();
    println!(
        "{} -> ({}, {}, {}) standard={} image={}",
        path,
        a,
        b,
        c,
        tile.is_standard(),
        tile.image_path()
    );
    Ok(())
}
