//! Typed inputs to the turn-sync core.
//!
//! Payloads arrive already deserialized from the transport layer. Field names
//! follow the server's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Server confirmed a placement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovePlayed {
    /// Slot the tile was placed on.
    pub position: i64,
    /// Points reported for this player.
    pub points: i32,
    /// AI plateau images after the AI's reply, empty if unchanged.
    pub ai_tiles: Vec<String>,
    /// AI score after its reply.
    pub ai_score: i32,
    /// Whether the server ended the game with this move.
    pub is_game_over: bool,
}

/// Server announced a new turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnStarted {
    /// Tile drawn for the turn, empty when the player must pick one.
    pub tile: String,
    /// Image path of the drawn tile.
    pub tile_image: String,
    /// Server turn counter.
    pub turn_number: u32,
    /// Open slots for this player.
    pub positions: Vec<i64>,
    /// Players the server is still waiting on.
    pub waiting: Vec<String>,
}

/// A player entry in the final roster.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInfo {
    /// Player id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Final score.
    pub score: i32,
}

/// Server ended the game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameFinished {
    /// Final roster.
    pub players: Vec<PlayerInfo>,
    /// This player's final plateau images.
    pub player_tiles: Vec<String>,
    /// The AI's final plateau images.
    pub ai_tiles: Vec<String>,
    /// Every plateau as `(owner id, images)`.
    pub all_plateaus: Vec<(String, Vec<String>)>,
}

/// AI proposed a placement (real-game mode).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiMoveResult {
    /// Proposed slot; `-1` means no move.
    pub position: i64,
    /// Free-form information from the AI service.
    pub metadata: String,
}

/// Player chose a tile from the picker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileSelected {
    /// Chosen tile id or image path.
    pub tile_id: String,
}

/// Client joined (or created) a session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionJoined {
    /// Session id.
    pub session_id: String,
    /// This client's player id.
    pub player_id: String,
    /// Single human against the AI.
    pub solo_mode: bool,
    /// Tiles are picked by the player rather than drawn by the server.
    pub real_game_mode: bool,
}

/// Full game state fetched from the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStateLoaded {
    /// Server turn counter.
    pub current_turn: u32,
    /// Open slots for this player.
    pub positions: Vec<i64>,
    /// This player's plateau images.
    pub player_tiles: Vec<String>,
    /// The AI's plateau images.
    pub ai_tiles: Vec<String>,
    /// Players the server is still waiting on.
    pub waiting: Vec<String>,
    /// Whether the game already ended.
    pub is_finished: bool,
}

/// Every input the core accepts.
///
/// Serialized with a `type` tag so event logs can be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClientEvent {
    /// Session established.
    SessionJoined(SessionJoined),
    /// Game state fetched.
    GameStateLoaded(GameStateLoaded),
    /// Turn announced.
    TurnStarted(TurnStarted),
    /// Placement confirmed.
    MovePlayed(MovePlayed),
    /// Safety poll tick.
    PollTurn,
    /// Tile picked.
    TileSelected(TileSelected),
    /// AI proposal received.
    AiMoveResult(AiMoveResult),
    /// Game ended.
    GameFinished(GameFinished),
    /// User clicked a board slot.
    PlaceTile {
        /// Raw slot index from the UI.
        position: i64,
    },
    /// Session torn down.
    SessionLeft,
}

impl ClientEvent {
    /// Short snake_case name of the event kind.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_started_from_camel_case() {
        let json = r#"{"type":"turn_started","tile":"168","tileImage":"../image/168.png",
            "turnNumber":4,"positions":[0,5,18],"waiting":["p1","mcts_ai"]}"#;
        let event: ClientEvent = serde_json::from_str(json).expect("parse");
        match event {
            ClientEvent::TurnStarted(turn) => {
                assert_eq!(turn.turn_number, 4);
                assert_eq!(turn.positions, vec![0, 5, 18]);
                assert_eq!(turn.waiting, vec!["p1", "mcts_ai"]);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"move_played","position":7}"#).expect("parse");
        assert_eq!(
            event,
            ClientEvent::MovePlayed(MovePlayed {
                position: 7,
                ..MovePlayed::default()
            })
        );
    }

    #[test]
    fn test_plateaus_are_pairs() {
        let json = r#"{"type":"game_finished","allPlateaus":[["p1",["../image/168.png"]]]}"#;
        let event: ClientEvent = serde_json::from_str(json).expect("parse");
        let ClientEvent::GameFinished(finished) = event else {
            panic!("expected game_finished");
        };
        assert_eq!(finished.all_plateaus[0].0, "p1");
        assert!(finished.players.is_empty());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ClientEvent::PollTurn.kind(), "poll_turn");
        assert_eq!(ClientEvent::PlaceTile { position: 3 }.kind(), "place_tile");
    }
}
