//! First-class invariants for game snapshots.
//!
//! Each invariant is a property every snapshot produced by a transition must
//! satisfy. They are checked after transitions in debug builds and are
//! testable independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of two to six invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();

                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+

                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);
impl_invariant_set!(I1, I2, I3, I4, I5, I6);

pub mod current_tile;
pub mod lifecycle_flags;
pub mod plateau_shape;
pub mod positions_in_range;
pub mod turn_counter;
pub mod used_tiles;

pub use current_tile::TileImageRequiresTile;
pub use lifecycle_flags::{GameStateRequiresSession, PlayerIdWithSession};
pub use plateau_shape::PlateauShapeInvariant;
pub use positions_in_range::PositionsInRange;
pub use turn_counter::turn_number_monotonic;
pub use used_tiles::UsedTilesUniqueInvariant;

/// All snapshot invariants as a composable set.
pub type SnapshotInvariants = (
    PlateauShapeInvariant,
    PositionsInRange,
    TileImageRequiresTile,
    GameStateRequiresSession,
    PlayerIdWithSession,
    UsedTilesUniqueInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameSnapshot;

    #[test]
    fn test_invariant_set_holds_for_default_snapshot() {
        assert!(SnapshotInvariants::check_all(&GameSnapshot::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let broken = GameSnapshot::new()
            .with_has_game_state(true)
            .with_current_tile_image(Some("../image/168.png".to_string()))
            .with_used_tiles(vec!["168".to_string(), "168".to_string()]);

        let violations = SnapshotInvariants::check_all(&broken).expect_err("broken snapshot");
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (PlateauShapeInvariant, UsedTilesUniqueInvariant);
        assert!(TwoInvariants::check_all(&GameSnapshot::new()).is_ok());
    }
}
