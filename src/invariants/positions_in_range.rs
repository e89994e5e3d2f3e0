//! Positions invariant: every slot the snapshot refers to is on the board.

use super::Invariant;
use crate::GameSnapshot;
use crate::plateau::PLATEAU_SLOTS;

/// Invariant: open positions and the AI's pending proposal lie in 0-18.
pub struct PositionsInRange;

impl Invariant<GameSnapshot> for PositionsInRange {
    fn holds(snapshot: &GameSnapshot) -> bool {
        snapshot
            .available_positions()
            .iter()
            .copied()
            .chain(snapshot.pending_ai_position())
            .all(|position| position.index() < PLATEAU_SLOTS)
    }

    fn description() -> &'static str {
        "Available and pending AI positions are on the plateau"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plateau::BoardPosition;
    use crate::{AiMoveResult, TurnSync, TurnStarted};

    #[test]
    fn test_full_board_holds() {
        let snapshot = GameSnapshot::new()
            .with_available_positions(BoardPosition::all().collect())
            .with_pending_ai_position(Some(BoardPosition::MAX));
        assert!(PositionsInRange::holds(&snapshot));
    }

    #[test]
    fn test_server_values_are_filtered_before_storage() {
        let sync = TurnSync::default();
        let base = GameSnapshot::new()
            .with_has_session(true)
            .with_player_id(Some("p1".to_string()));
        let turn = TurnStarted {
            tile: "168".to_string(),
            positions: vec![-1, 0, 18, 19, 255],
            waiting: vec!["p1".to_string()],
            ..TurnStarted::default()
        };
        let after_turn = sync.on_turn_started(&base, &turn);
        let after_ai = sync.on_ai_move_result(
            after_turn.snapshot(),
            &AiMoveResult {
                position: 19,
                ..AiMoveResult::default()
            },
        );

        assert!(PositionsInRange::holds(after_ai.snapshot()));
        assert_eq!(after_ai.snapshot().available_positions().len(), 2);
        assert_eq!(after_ai.snapshot().pending_ai_position(), None);
    }
}
