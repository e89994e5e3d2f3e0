//! Turn counter check: the turn number never goes backwards.
//!
//! Unlike the other invariants this relates two snapshots, so it is a plain
//! function over a transition rather than an [`Invariant`](super::Invariant).

use crate::GameSnapshot;

/// Whether `after` keeps the turn number at or above `before`.
///
/// Leaving the session resets the counter, so a transition to a
/// disconnected snapshot is always accepted.
pub fn turn_number_monotonic(before: &GameSnapshot, after: &GameSnapshot) -> bool {
    !after.has_session() || after.current_turn_number() >= before.current_turn_number()
}
