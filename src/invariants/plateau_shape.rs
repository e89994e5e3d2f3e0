//! Plateau shape invariant: both boards always have exactly 19 slots.

use super::Invariant;
use crate::GameSnapshot;
use crate::plateau::PLATEAU_SLOTS;

/// Invariant: the player's and the AI's plateaus each hold 19 slots.
///
/// Unfilled slots carry the empty-image sentinel rather than being dropped.
pub struct PlateauShapeInvariant;

impl Invariant<GameSnapshot> for PlateauShapeInvariant {
    fn holds(snapshot: &GameSnapshot) -> bool {
        snapshot.plateau_tiles().slots().len() == PLATEAU_SLOTS
            && snapshot.ai_plateau_tiles().slots().len() == PLATEAU_SLOTS
    }

    fn description() -> &'static str {
        "Plateaus have exactly 19 slots"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Plateau;

    #[test]
    fn test_default_snapshot_holds() {
        assert!(PlateauShapeInvariant::holds(&GameSnapshot::new()));
    }

    #[test]
    fn test_server_lists_are_normalized() {
        let snapshot = GameSnapshot::new()
            .with_plateau_tiles(Plateau::from_images(&vec!["../image/168.png".to_string(); 3]))
            .with_ai_plateau_tiles(Plateau::from_images(&vec!["../image/573.png".to_string(); 40]));
        assert!(PlateauShapeInvariant::holds(&snapshot));
    }
}
