//! Used tiles invariant: a picked tile is recorded once.

use super::Invariant;
use crate::GameSnapshot;
use std::collections::HashSet;

/// Invariant: `used_tiles` has no duplicates.
pub struct UsedTilesUniqueInvariant;

impl Invariant<GameSnapshot> for UsedTilesUniqueInvariant {
    fn holds(snapshot: &GameSnapshot) -> bool {
        let mut seen = HashSet::new();
        snapshot.used_tiles().iter().all(|tile| seen.insert(tile))
    }

    fn description() -> &'static str {
        "Used tiles contain no duplicates"
    }
}
