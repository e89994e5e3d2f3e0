//! Plateau Sync library - turn synchronization for a tile-placement game client
//!
//! The server owns the game. This crate holds the client's pure decision
//! core: given the current snapshot and an incoming event it computes the
//! next snapshot and the command the runtime must execute to keep converging
//! on the server's state.
//!
//! # Architecture
//!
//! - **Tile**: tile path codec
//! - **Snapshot**: client-observable game state
//! - **Command**: effect descriptions (start turn, schedule poll, batch)
//! - **TurnSync**: the transitions, one per event kind
//! - **Gating / Dead state**: predicates over a snapshot
//! - **Replay**: folds an event log through the core
//!
//! # Example
//!
//! ```
//! use plateau_sync::{ClientEvent, GameSnapshot, TurnSync, is_dead_state};
//!
//! let sync = TurnSync::default();
//! let transition = sync.apply(&GameSnapshot::new(), &ClientEvent::PollTurn);
//! assert!(transition.command().start_turn().is_some());
//! assert!(!is_dead_state(transition.snapshot()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod command;
mod config;
mod dead_state;
mod events;
mod gating;
mod plateau;
mod replay;
mod snapshot;
mod tile;
mod turn_sync;

pub mod invariants;

// Crate-level exports - Tile codec and board
pub use plateau::{BoardPosition, OutOfBoard, PLATEAU_SLOTS, Plateau};
pub use tile::{EMPTY_TILE_IMAGE, Tile};

// Crate-level exports - State and commands
pub use command::{CommandIntent, StartTurnRequest};
pub use snapshot::{GameSnapshot, ResolvedPlateau};

// Crate-level exports - Events
pub use events::{
    AiMoveResult, ClientEvent, GameFinished, GameStateLoaded, MovePlayed, PlayerInfo,
    SessionJoined, TileSelected, TurnStarted,
};

// Crate-level exports - Core
pub use config::{AI_LABEL, ConfigError, SyncConfig};
pub use dead_state::{Lifecycle, is_dead_state};
pub use gating::{PlacementError, can_click_position, check_placement};
pub use turn_sync::{Transition, TurnSync};

// Crate-level exports - Replay
pub use replay::{Replay, ReplayError, ReplayStep, parse_event_log, read_event_log};
