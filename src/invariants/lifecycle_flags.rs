//! Lifecycle flag invariants: game state and player id follow the session.

use super::Invariant;
use crate::GameSnapshot;

/// Invariant: `has_game_state` implies `has_session`.
pub struct GameStateRequiresSession;

impl Invariant<GameSnapshot> for GameStateRequiresSession {
    fn holds(snapshot: &GameSnapshot) -> bool {
        !snapshot.has_game_state() || snapshot.has_session()
    }

    fn description() -> &'static str {
        "Game state requires a session"
    }
}

/// Invariant: a connected snapshot always knows its player id.
pub struct PlayerIdWithSession;

impl Invariant<GameSnapshot> for PlayerIdWithSession {
    fn holds(snapshot: &GameSnapshot) -> bool {
        !snapshot.has_session() || snapshot.player_id().is_some()
    }

    fn description() -> &'static str {
        "Player id is set whenever a session exists"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_snapshot_holds() {
        let snapshot = GameSnapshot::new()
            .with_has_session(true)
            .with_has_game_state(true)
            .with_player_id(Some("p1".to_string()));
        assert!(GameStateRequiresSession::holds(&snapshot));
        assert!(PlayerIdWithSession::holds(&snapshot));
    }

    #[test]
    fn test_game_state_without_session_violates() {
        let snapshot = GameSnapshot::new().with_has_game_state(true);
        assert!(!GameStateRequiresSession::holds(&snapshot));
    }

    #[test]
    fn test_session_without_player_violates() {
        let snapshot = GameSnapshot::new().with_has_session(true);
        assert!(!PlayerIdWithSession::holds(&snapshot));
    }
}
