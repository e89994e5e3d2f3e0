//! Command-line interface for plateau_sync.

use clap::{Parser, Subcommand};

/// Plateau Sync - turn synchronization core for a tile-placement game client
#[derive(Parser, Debug)]
#[command(name = "plateau_sync")]
#[command(about = "Replay client event logs through the turn-sync core", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a JSON-lines event log and report commands and dead states
    Replay {
        /// Path to the event log
        events: std::path::PathBuf,

        /// Path to a TOML sync config
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Print every step as JSON instead of a summary line
        #[arg(long)]
        json: bool,
    },

    /// Decode a tile path or code
    Tile {
        /// Tile path, e.g. ../image/168.png
        path: String,
    },
}
