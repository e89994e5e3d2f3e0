//! Game state snapshot: everything the client believes about the game.
//!
//! Snapshots are values. Transitions in [`crate::TurnSync`] take the previous
//! snapshot by reference and return a new one; nothing mutates a snapshot in
//! place.

use crate::plateau::{BoardPosition, Plateau};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A finished plateau with its owner resolved to a display name.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlateau {
    owner_id: String,
    display_name: String,
    tiles: Vec<String>,
}

/// Client-side view of a game session.
///
/// `Default` is the "not connected" state. The `with_*` setters exist for
/// seeding a runtime or a test; they consume and return the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Session id, once connected.
    pub(crate) session_id: Option<String>,
    /// This client's player id, once connected.
    pub(crate) player_id: Option<String>,
    /// Tile drawn for the active turn.
    pub(crate) current_tile: Option<String>,
    /// Image of the drawn tile.
    pub(crate) current_tile_image: Option<String>,
    /// This player's board.
    pub(crate) plateau_tiles: Plateau,
    /// The AI's board.
    pub(crate) ai_plateau_tiles: Plateau,
    /// Slots still open for placement.
    pub(crate) available_positions: BTreeSet<BoardPosition>,
    /// Whether the client believes it may act now.
    pub(crate) my_turn: bool,
    /// Last confirmed turn number.
    pub(crate) current_turn_number: u32,
    /// Players the server is waiting on.
    pub(crate) waiting_for_players: Vec<String>,
    /// Whether tiles are chosen from a picker.
    pub(crate) is_real_game_mode: bool,
    /// Whether the tile picker is open.
    pub(crate) show_tile_picker: bool,
    /// Tiles already picked this game.
    pub(crate) used_tiles: Vec<String>,
    /// The AI's validated proposal.
    pub(crate) pending_ai_position: Option<BoardPosition>,
    /// Single human against the AI.
    pub(crate) is_solo_mode: bool,
    /// UI busy flag.
    pub(crate) loading: bool,
    /// Last status line.
    pub(crate) status_message: String,
    /// Session established.
    pub(crate) has_session: bool,
    /// Game state received.
    pub(crate) has_game_state: bool,
    /// Server reported the game finished.
    pub(crate) game_state_is_finished: bool,
    /// Points last reported for this player.
    pub(crate) my_points: i32,
    /// AI score last reported.
    pub(crate) ai_score: i32,
    /// Plateaus resolved when the game finished.
    pub(crate) final_plateaus: Vec<ResolvedPlateau>,
}

impl GameSnapshot {
    /// Creates a disconnected snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session id, once connected.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// This client's player id, once connected.
    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    /// Tile drawn for the active turn.
    pub fn current_tile(&self) -> Option<&str> {
        self.current_tile.as_deref()
    }

    /// Image of the tile drawn for the active turn.
    pub fn current_tile_image(&self) -> Option<&str> {
        self.current_tile_image.as_deref()
    }

    /// This player's board.
    pub fn plateau_tiles(&self) -> &Plateau {
        &self.plateau_tiles
    }

    /// The AI's board.
    pub fn ai_plateau_tiles(&self) -> &Plateau {
        &self.ai_plateau_tiles
    }

    /// Slots still open for placement.
    pub fn available_positions(&self) -> &BTreeSet<BoardPosition> {
        &self.available_positions
    }

    /// Whether the client believes it may act now.
    pub fn my_turn(&self) -> bool {
        self.my_turn
    }

    /// Last confirmed turn number.
    pub fn current_turn_number(&self) -> u32 {
        self.current_turn_number
    }

    /// Players the server is waiting on.
    pub fn waiting_for_players(&self) -> &[String] {
        &self.waiting_for_players
    }

    /// Whether tiles are chosen from a picker.
    pub fn is_real_game_mode(&self) -> bool {
        self.is_real_game_mode
    }

    /// Whether the tile picker is open.
    pub fn show_tile_picker(&self) -> bool {
        self.show_tile_picker
    }

    /// Tiles already picked this game.
    pub fn used_tiles(&self) -> &[String] {
        &self.used_tiles
    }

    /// The AI's validated proposal, if any.
    pub fn pending_ai_position(&self) -> Option<BoardPosition> {
        self.pending_ai_position
    }

    /// Whether this is a single human against the AI.
    pub fn is_solo_mode(&self) -> bool {
        self.is_solo_mode
    }

    /// UI busy flag.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Last status line.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether a session is established.
    pub fn has_session(&self) -> bool {
        self.has_session
    }

    /// Whether the game state has been received.
    pub fn has_game_state(&self) -> bool {
        self.has_game_state
    }

    /// Whether the server reported the game finished.
    pub fn game_state_is_finished(&self) -> bool {
        self.game_state_is_finished
    }

    /// Points last reported for this player.
    pub fn my_points(&self) -> i32 {
        self.my_points
    }

    /// AI score last reported.
    pub fn ai_score(&self) -> i32 {
        self.ai_score
    }

    /// Plateaus resolved when the game finished.
    pub fn final_plateaus(&self) -> &[ResolvedPlateau] {
        &self.final_plateaus
    }

    /// Whether `player_id` is set and appears in `waiting`.
    pub fn is_waiting_on_me(&self, waiting: &[String]) -> bool {
        self.player_id
            .as_ref()
            .is_some_and(|me| waiting.iter().any(|id| id == me))
    }
}
