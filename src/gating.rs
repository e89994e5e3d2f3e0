//! Click gating: whether the board accepts a placement right now.
//!
//! Each precondition is its own check so a rejection names the first
//! condition that failed. [`can_click_position`] is the predicate the
//! rendering layer consults; [`check_placement`] additionally validates a
//! concrete slot.

use crate::GameSnapshot;
use crate::plateau::BoardPosition;
use tracing::{debug, instrument};

/// Reason a placement request is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// The client is not authorized to act.
    #[display("It is not your turn")]
    NotMyTurn,

    /// No tile has been drawn for this turn.
    #[display("No tile to place")]
    NoCurrentTile,

    /// Every slot is filled.
    #[display("No positions left")]
    NoPositionsLeft,

    /// The tile picker is open in real-game mode.
    #[display("Pick a tile first")]
    TilePickerOpen,

    /// The slot is on the board but not open.
    #[display("Position {} is not available", _0)]
    PositionUnavailable(BoardPosition),

    /// The slot index is off the board.
    #[display("Position {} is outside the plateau", _0)]
    InvalidPosition(i64),
}

impl std::error::Error for PlacementError {}

/// Precondition: the client believes it is its turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the precondition.
    pub fn check(snapshot: &GameSnapshot) -> Result<(), PlacementError> {
        if snapshot.my_turn() {
            Ok(())
        } else {
            Err(PlacementError::NotMyTurn)
        }
    }
}

/// Precondition: a tile is drawn.
pub struct TileDrawn;

impl TileDrawn {
    /// Checks the precondition.
    pub fn check(snapshot: &GameSnapshot) -> Result<(), PlacementError> {
        if snapshot.current_tile().is_some() {
            Ok(())
        } else {
            Err(PlacementError::NoCurrentTile)
        }
    }
}

/// Precondition: at least one slot is open.
pub struct PositionsRemain;

impl PositionsRemain {
    /// Checks the precondition.
    pub fn check(snapshot: &GameSnapshot) -> Result<(), PlacementError> {
        if snapshot.available_positions().is_empty() {
            Err(PlacementError::NoPositionsLeft)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the picker is closed, or the game is not in picker mode.
pub struct PickerClosed;

impl PickerClosed {
    /// Checks the precondition.
    pub fn check(snapshot: &GameSnapshot) -> Result<(), PlacementError> {
        if snapshot.is_real_game_mode() && snapshot.show_tile_picker() {
            Err(PlacementError::TilePickerOpen)
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for any board click.
pub struct BoardInteractive;

impl BoardInteractive {
    /// Validates all click preconditions.
    pub fn check(snapshot: &GameSnapshot) -> Result<(), PlacementError> {
        PlayersTurn::check(snapshot)?;
        TileDrawn::check(snapshot)?;
        PositionsRemain::check(snapshot)?;
        PickerClosed::check(snapshot)?;
        Ok(())
    }
}

/// Whether the board accepts a placement click.
#[instrument(skip(snapshot), fields(my_turn = snapshot.my_turn()))]
pub fn can_click_position(snapshot: &GameSnapshot) -> bool {
    match BoardInteractive::check(snapshot) {
        Ok(()) => true,
        Err(reason) => {
            debug!(%reason, "Board not interactive");
            false
        }
    }
}

/// Validates a placement at a raw slot index.
#[instrument(skip(snapshot))]
pub fn check_placement(snapshot: &GameSnapshot, position: i64) -> Result<BoardPosition, PlacementError> {
    BoardInteractive::check(snapshot)?;

    let slot = BoardPosition::try_from(position)
        .map_err(|_| PlacementError::InvalidPosition(position))?;

    if snapshot.available_positions().contains(&slot) {
        Ok(slot)
    } else {
        Err(PlacementError::PositionUnavailable(slot))
    }
}
