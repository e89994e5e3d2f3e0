//! Turn synchronization core.
//!
//! One transition per incoming event kind. Every transition borrows the
//! previous snapshot, builds a new one and returns it together with the
//! command the runtime must execute. Nothing here performs I/O or reads a
//! clock, so feeding the same events always yields the same results.
//!
//! Start-turn acknowledgements can be lost. The core therefore pairs every
//! start-turn it sends after a move with a scheduled poll, and the poll
//! transition re-requests the turn whenever the client is not holding one.

use crate::command::{CommandIntent, StartTurnRequest};
use crate::config::SyncConfig;
use crate::events::{
    AiMoveResult, ClientEvent, GameFinished, GameStateLoaded, MovePlayed, SessionJoined,
    TileSelected, TurnStarted,
};
use crate::gating::{PlacementError, check_placement};
use crate::plateau::{BoardPosition, Plateau};
use crate::snapshot::{GameSnapshot, ResolvedPlateau};
use crate::tile::Tile;
use derive_getters::Getters;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Result of applying one event: the next snapshot and the command to run.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Transition {
    snapshot: GameSnapshot,
    command: CommandIntent,
    placement: Option<BoardPosition>,
}

impl Transition {
    /// A transition that emits no command.
    pub fn quiet(snapshot: GameSnapshot) -> Self {
        Self::with_command(snapshot, CommandIntent::NoCmd)
    }

    /// A transition that emits `command`.
    pub fn with_command(snapshot: GameSnapshot, command: CommandIntent) -> Self {
        Self {
            snapshot,
            command,
            placement: None,
        }
    }

    /// Splits into snapshot and command.
    pub fn into_parts(self) -> (GameSnapshot, CommandIntent) {
        (self.snapshot, self.command)
    }
}

/// The turn synchronization state machine.
#[derive(Debug, Clone, Default, Getters)]
pub struct TurnSync {
    config: SyncConfig,
}

impl TurnSync {
    /// Creates a state machine with the given configuration.
    #[instrument(skip(config))]
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Dispatches an event to its transition.
    ///
    /// A refused placement leaves the snapshot unchanged apart from the
    /// status message and emits no command.
    #[instrument(skip(self, snapshot, event), fields(event = event.kind()))]
    pub fn apply(&self, snapshot: &GameSnapshot, event: &ClientEvent) -> Transition {
        match event {
            ClientEvent::SessionJoined(joined) => self.on_session_joined(snapshot, joined),
            ClientEvent::GameStateLoaded(loaded) => self.on_game_state_loaded(snapshot, loaded),
            ClientEvent::TurnStarted(turn) => self.on_turn_started(snapshot, turn),
            ClientEvent::MovePlayed(played) => self.on_move_played(snapshot, played),
            ClientEvent::PollTurn => self.on_poll_turn(snapshot),
            ClientEvent::TileSelected(selected) => self.on_tile_selected(snapshot, selected),
            ClientEvent::AiMoveResult(result) => self.on_ai_move_result(snapshot, result),
            ClientEvent::GameFinished(finished) => self.on_game_finished(snapshot, finished),
            ClientEvent::PlaceTile { position } => self
                .on_place_tile(snapshot, *position)
                .unwrap_or_else(|reason| {
                    Transition::quiet(GameSnapshot {
                        status_message: reason.to_string(),
                        ..snapshot.clone()
                    })
                }),
            ClientEvent::SessionLeft => self.on_session_left(snapshot),
        }
    }

    /// Server confirmed a placement.
    ///
    /// Clears the drawn tile and the turn, closes the played slot and merges
    /// the AI's reply. Unless the game is over, requests the next turn and
    /// schedules a safety poll in case that request's acknowledgement is lost.
    #[instrument(skip(self, snapshot, event), fields(position = event.position, game_over = event.is_game_over))]
    pub fn on_move_played(&self, snapshot: &GameSnapshot, event: &MovePlayed) -> Transition {
        let mut available_positions = snapshot.available_positions.clone();
        let mut plateau_tiles = snapshot.plateau_tiles.clone();

        match BoardPosition::try_from(event.position) {
            Ok(played) => {
                if !available_positions.remove(&played) {
                    debug!(%played, "Played position was not in the open set");
                }
                if let Some(image) = snapshot.current_tile_image()
                    && plateau_tiles.is_empty_at(played)
                {
                    plateau_tiles = plateau_tiles.with_placed(played, image);
                }
            }
            Err(e) => warn!(error = %e, "Server confirmed an off-board position"),
        }

        let ai_plateau_tiles = if event.ai_tiles.is_empty() {
            snapshot.ai_plateau_tiles.clone()
        } else {
            Plateau::from_images(&event.ai_tiles)
        };

        let status_message = if event.is_game_over {
            format!("Game over: {} points", event.points)
        } else {
            format!("Tile placed: {} points", event.points)
        };

        let next = GameSnapshot {
            current_tile: None,
            current_tile_image: None,
            my_turn: false,
            loading: false,
            available_positions,
            plateau_tiles,
            ai_plateau_tiles,
            my_points: event.points,
            ai_score: event.ai_score,
            status_message,
            ..snapshot.clone()
        };

        if event.is_game_over {
            info!(points = event.points, ai_score = event.ai_score, "Final move confirmed");
            return self.finish(snapshot, next, CommandIntent::NoCmd);
        }

        info!(points = event.points, "Move confirmed, requesting next turn");
        let command = CommandIntent::batch([
            CommandIntent::SendStartTurn(self.start_turn_request(&next)),
            CommandIntent::SchedulePollTurn {
                delay: self.config.poll_delay(next.is_solo_mode),
            },
        ]);
        self.finish(snapshot, next, command)
    }

    /// Periodic safety poll.
    ///
    /// Re-requests the turn whenever the client is not holding one; does
    /// nothing while it is.
    #[instrument(skip(self, snapshot), fields(my_turn = snapshot.my_turn()))]
    pub fn on_poll_turn(&self, snapshot: &GameSnapshot) -> Transition {
        if snapshot.my_turn {
            debug!("Poll while holding the turn, nothing to recover");
            return Transition::quiet(snapshot.clone());
        }

        debug!(turn = snapshot.current_turn_number, "Poll without a turn, re-requesting");
        let command = CommandIntent::SendStartTurn(self.start_turn_request(snapshot));
        Transition::with_command(snapshot.clone(), command)
    }

    /// Server announced a turn.
    ///
    /// Only a turn that waits on this player hands over the tile. Otherwise
    /// the client drops any stale tile and waits; the poll loop
    /// resynchronizes. The lifecycle flags are left alone: only a loaded
    /// game state clears a dead snapshot.
    #[instrument(skip(self, snapshot, event), fields(turn = event.turn_number))]
    pub fn on_turn_started(&self, snapshot: &GameSnapshot, event: &TurnStarted) -> Transition {
        if !snapshot.is_waiting_on_me(&event.waiting) {
            debug!(waiting = ?event.waiting, "Turn is not waiting on this player");
            let next = GameSnapshot {
                current_tile: None,
                current_tile_image: None,
                my_turn: false,
                waiting_for_players: event.waiting.clone(),
                status_message: "Waiting for other players".to_string(),
                ..snapshot.clone()
            };
            return self.finish(snapshot, next, CommandIntent::NoCmd);
        }

        let available_positions = open_positions(&event.positions);
        let current_turn_number = snapshot.current_turn_number.max(event.turn_number);
        let tile = non_blank(&event.tile);

        let next = match tile {
            Some(tile) => {
                let image = non_blank(&event.tile_image).unwrap_or_else(|| image_for(&tile));
                info!(%tile, "Turn started with drawn tile");
                GameSnapshot {
                    current_tile: Some(tile),
                    current_tile_image: Some(image),
                    my_turn: true,
                    loading: false,
                    available_positions,
                    current_turn_number,
                    waiting_for_players: event.waiting.clone(),
                    status_message: "Your turn".to_string(),
                    ..snapshot.clone()
                }
            }
            None if snapshot.is_real_game_mode => {
                info!("Turn started, opening tile picker");
                GameSnapshot {
                    current_tile: None,
                    current_tile_image: None,
                    my_turn: true,
                    loading: false,
                    show_tile_picker: true,
                    available_positions,
                    current_turn_number,
                    waiting_for_players: event.waiting.clone(),
                    status_message: "Pick a tile".to_string(),
                    ..snapshot.clone()
                }
            }
            None => {
                // Without a tile the turn cannot be played; leaving my_turn
                // false lets the next poll re-request it.
                warn!("Turn started without a tile outside picker mode");
                GameSnapshot {
                    current_tile: None,
                    current_tile_image: None,
                    my_turn: false,
                    available_positions,
                    current_turn_number,
                    waiting_for_players: event.waiting.clone(),
                    ..snapshot.clone()
                }
            }
        };

        self.finish(snapshot, next, CommandIntent::NoCmd)
    }

    /// Player picked a tile in real-game mode.
    #[instrument(skip(self, snapshot, event), fields(tile_id = %event.tile_id))]
    pub fn on_tile_selected(&self, snapshot: &GameSnapshot, event: &TileSelected) -> Transition {
        let Some(tile) = non_blank(&event.tile_id) else {
            warn!("Ignoring blank tile selection");
            return Transition::quiet(snapshot.clone());
        };

        let mut used_tiles = snapshot.used_tiles.clone();
        if !used_tiles.contains(&tile) {
            used_tiles.push(tile.clone());
        }

        info!(%tile, "Tile selected");
        let next = GameSnapshot {
            current_tile_image: Some(image_for(&tile)),
            status_message: format!("Place tile {}", tile),
            current_tile: Some(tile),
            show_tile_picker: false,
            used_tiles,
            ..snapshot.clone()
        };
        self.finish(snapshot, next, CommandIntent::NoCmd)
    }

    /// AI proposed a placement.
    ///
    /// Off-board proposals, including the `-1` "no move" sentinel, clear the
    /// pending position instead of reaching the board.
    #[instrument(skip(self, snapshot, event), fields(position = event.position))]
    pub fn on_ai_move_result(&self, snapshot: &GameSnapshot, event: &AiMoveResult) -> Transition {
        let pending_ai_position = match BoardPosition::try_from(event.position) {
            Ok(position) => {
                debug!(%position, metadata = %event.metadata, "AI proposal accepted");
                Some(position)
            }
            Err(e) => {
                warn!(error = %e, "AI proposal rejected");
                None
            }
        };

        let next = GameSnapshot {
            pending_ai_position,
            ..snapshot.clone()
        };
        self.finish(snapshot, next, CommandIntent::NoCmd)
    }

    /// Server ended the game.
    ///
    /// Resolves each plateau owner against the roster; owners missing from it
    /// are labelled with the configured AI label. An empty plateau list is a
    /// valid result.
    #[instrument(skip(self, snapshot, event), fields(plateaus = event.all_plateaus.len()))]
    pub fn on_game_finished(&self, snapshot: &GameSnapshot, event: &GameFinished) -> Transition {
        let final_plateaus: Vec<ResolvedPlateau> = event
            .all_plateaus
            .iter()
            .map(|(owner_id, tiles)| {
                let display_name = event
                    .players
                    .iter()
                    .find(|player| &player.id == owner_id)
                    .map(|player| player.name.clone())
                    .unwrap_or_else(|| self.config.ai_label().clone());
                ResolvedPlateau::new(owner_id.clone(), display_name, tiles.clone())
            })
            .collect();

        let score_of = |id: Option<&str>, fallback: i32| {
            id.and_then(|id| event.players.iter().find(|player| player.id == id))
                .map_or(fallback, |player| player.score)
        };
        let my_points = score_of(snapshot.player_id(), snapshot.my_points);
        let ai_score = score_of(Some(self.config.ai_player_id().as_str()), snapshot.ai_score);

        let plateau_tiles = if event.player_tiles.is_empty() {
            snapshot.plateau_tiles.clone()
        } else {
            Plateau::from_images(&event.player_tiles)
        };
        let ai_plateau_tiles = if event.ai_tiles.is_empty() {
            snapshot.ai_plateau_tiles.clone()
        } else {
            Plateau::from_images(&event.ai_tiles)
        };

        info!(my_points, ai_score, "Game finished");
        let next = GameSnapshot {
            game_state_is_finished: true,
            current_tile: None,
            current_tile_image: None,
            my_turn: false,
            loading: false,
            show_tile_picker: false,
            plateau_tiles,
            ai_plateau_tiles,
            my_points,
            ai_score,
            final_plateaus,
            status_message: "Game finished".to_string(),
            ..snapshot.clone()
        };
        self.finish(snapshot, next, CommandIntent::NoCmd)
    }

    /// Client joined a session. Starts from a clean snapshot.
    ///
    /// The runtime is expected to fetch the game state next; until it
    /// arrives the snapshot reports as dead.
    #[instrument(skip(self, snapshot, event), fields(session_id = %event.session_id, player_id = %event.player_id))]
    pub fn on_session_joined(&self, snapshot: &GameSnapshot, event: &SessionJoined) -> Transition {
        info!(solo = event.solo_mode, real_game = event.real_game_mode, "Session joined");
        let next = GameSnapshot {
            session_id: Some(event.session_id.clone()),
            player_id: Some(event.player_id.clone()),
            has_session: true,
            is_solo_mode: event.solo_mode,
            is_real_game_mode: event.real_game_mode,
            status_message: "Connected".to_string(),
            ..GameSnapshot::default()
        };
        self.finish(snapshot, next, CommandIntent::NoCmd)
    }

    /// Full game state arrived.
    ///
    /// Establishes the game state, which clears a dead snapshot. If the game
    /// is running and the client holds no tile, requests the turn.
    #[instrument(skip(self, snapshot, event), fields(turn = event.current_turn, finished = event.is_finished))]
    pub fn on_game_state_loaded(&self, snapshot: &GameSnapshot, event: &GameStateLoaded) -> Transition {
        if !snapshot.has_session {
            warn!("Game state arrived without a session, ignoring");
            return Transition::quiet(snapshot.clone());
        }

        let next = GameSnapshot {
            has_game_state: true,
            game_state_is_finished: snapshot.game_state_is_finished || event.is_finished,
            current_turn_number: snapshot.current_turn_number.max(event.current_turn),
            available_positions: open_positions(&event.positions),
            plateau_tiles: Plateau::from_images(&event.player_tiles),
            ai_plateau_tiles: Plateau::from_images(&event.ai_tiles),
            waiting_for_players: event.waiting.clone(),
            loading: false,
            ..snapshot.clone()
        };

        let command = if next.game_state_is_finished || next.current_tile.is_some() {
            CommandIntent::NoCmd
        } else {
            CommandIntent::SendStartTurn(self.start_turn_request(&next))
        };
        info!(turn = next.current_turn_number, command = %command, "Game state loaded");
        self.finish(snapshot, next, command)
    }

    /// Client left the session. Back to the disconnected snapshot.
    #[instrument(skip(self, snapshot), fields(session_id = ?snapshot.session_id()))]
    pub fn on_session_left(&self, snapshot: &GameSnapshot) -> Transition {
        info!("Session left");
        self.finish(snapshot, GameSnapshot::default(), CommandIntent::NoCmd)
    }

    /// User clicked a board slot.
    ///
    /// On success the runtime sends the move for the returned
    /// [`Transition::placement`]; the server confirms with a move-played event.
    #[instrument(skip(self, snapshot))]
    pub fn on_place_tile(&self, snapshot: &GameSnapshot, position: i64) -> Result<Transition, PlacementError> {
        let slot = check_placement(snapshot, position).inspect_err(|reason| {
            debug!(%reason, "Placement refused");
        })?;

        info!(%slot, "Placement requested");
        let next = GameSnapshot {
            loading: true,
            status_message: format!("Placing tile at {}", slot),
            ..snapshot.clone()
        };
        let mut transition = self.finish(snapshot, next, CommandIntent::NoCmd);
        transition.placement = Some(slot);
        Ok(transition)
    }

    /// Builds the start-turn payload for a snapshot.
    pub fn start_turn_request(&self, snapshot: &GameSnapshot) -> StartTurnRequest {
        StartTurnRequest::new(
            snapshot.session_id.clone(),
            snapshot.player_id.clone(),
            snapshot.current_turn_number,
        )
    }

    /// Wraps a computed snapshot, checking invariants in debug builds.
    fn finish(&self, before: &GameSnapshot, after: GameSnapshot, command: CommandIntent) -> Transition {
        #[cfg(debug_assertions)]
        check_snapshot(before, &after);
        #[cfg(not(debug_assertions))]
        let _ = before;

        debug!(command = %command, "Transition computed");
        Transition::with_command(after, command)
    }
}

#[cfg(debug_assertions)]
fn check_snapshot(before: &GameSnapshot, after: &GameSnapshot) {
    use crate::invariants::{InvariantSet, SnapshotInvariants, turn_number_monotonic};

    if let Err(violations) = SnapshotInvariants::check_all(after) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Snapshot invariants violated");
    }
    if !turn_number_monotonic(before, after) {
        warn!(
            before = before.current_turn_number(),
            after = after.current_turn_number(),
            "Turn number went backwards"
        );
    }
}

/// Keeps the on-board positions from a server list.
fn open_positions(positions: &[i64]) -> BTreeSet<BoardPosition> {
    positions
        .iter()
        .filter_map(|&raw| match BoardPosition::try_from(raw) {
            Ok(position) => Some(position),
            Err(e) => {
                warn!(error = %e, "Dropping off-board position from server list");
                None
            }
        })
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Canonical image for a tile id, or the id itself when it is not a tile code.
fn image_for(tile: &str) -> String {
    Tile::parse(tile).map_or_else(|| tile.to_string(), |parsed| parsed.image_path())
}
