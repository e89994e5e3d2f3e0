//! Dead-state detection.
//!
//! A dead snapshot is one no scheduled transition can move forward: the
//! session exists but the game state never arrived. Waiting on another
//! player's turn, or on the first turn-start, is not dead; the poll loop
//! resolves those.

use crate::GameSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Connection lifecycle derived from the snapshot's flags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Lifecycle {
    /// No session.
    Disconnected,
    /// Session established, game state not yet received.
    Connected,
    /// Game state received and the game is running.
    InProgress,
    /// Server reported the game finished.
    Finished,
}

impl Lifecycle {
    /// Derives the lifecycle phase of a snapshot.
    pub fn of(snapshot: &GameSnapshot) -> Self {
        match (
            snapshot.has_session(),
            snapshot.has_game_state(),
            snapshot.game_state_is_finished(),
        ) {
            (false, _, _) => Lifecycle::Disconnected,
            (true, _, true) => Lifecycle::Finished,
            (true, true, false) => Lifecycle::InProgress,
            (true, false, false) => Lifecycle::Connected,
        }
    }
}

/// Whether the snapshot is stuck without external intervention.
///
/// True exactly when a session exists, no game state was established and the
/// game is not finished.
#[instrument(skip(snapshot), fields(session_id = ?snapshot.session_id()))]
pub fn is_dead_state(snapshot: &GameSnapshot) -> bool {
    let dead = Lifecycle::of(snapshot) == Lifecycle::Connected;
    if dead {
        warn!(
            turn = snapshot.current_turn_number(),
            my_turn = snapshot.my_turn(),
            "Session has no game state"
        );
    }
    dead
}
