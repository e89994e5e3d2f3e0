//! Tests for the click-gating predicate.

use plateau_sync::{BoardPosition, GameSnapshot, PlacementError, can_click_position, check_placement};
use std::collections::BTreeSet;

fn snapshot(my_turn: bool, tile: bool, positions: bool, picker_open: bool) -> GameSnapshot {
    let available: BTreeSet<BoardPosition> = if positions {
        BoardPosition::all().take(3).collect()
    } else {
        BTreeSet::new()
    };
    GameSnapshot::new()
        .with_my_turn(my_turn)
        .with_current_tile(tile.then(|| "168".to_string()))
        .with_available_positions(available)
        .with_is_real_game_mode(true)
        .with_show_tile_picker(picker_open)
}

#[test]
fn test_exhaustive_truth_table() {
    for my_turn in [false, true] {
        for tile in [false, true] {
            for positions in [false, true] {
                for picker_open in [false, true] {
                    let expected = my_turn && tile && positions && !picker_open;
                    assert_eq!(
                        can_click_position(&snapshot(my_turn, tile, positions, picker_open)),
                        expected,
                        "my_turn={my_turn} tile={tile} positions={positions} picker_open={picker_open}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_default_snapshot_not_clickable() {
    assert!(!can_click_position(&GameSnapshot::new()));
}

#[test]
fn test_rejection_reasons() {
    assert_eq!(
        check_placement(&snapshot(false, true, true, false), 0),
        Err(PlacementError::NotMyTurn)
    );
    assert_eq!(
        check_placement(&snapshot(true, false, true, false), 0),
        Err(PlacementError::NoCurrentTile)
    );
    assert_eq!(
        check_placement(&snapshot(true, true, false, false), 0),
        Err(PlacementError::NoPositionsLeft)
    );
    assert_eq!(
        check_placement(&snapshot(true, true, true, true), 0),
        Err(PlacementError::TilePickerOpen)
    );
}

#[test]
fn test_placement_on_open_slot() {
    let position = check_placement(&snapshot(true, true, true, false), 2).expect("open slot");
    assert_eq!(position.index(), 2);
}

#[test]
fn test_error_messages() {
    assert_eq!(PlacementError::NotMyTurn.to_string(), "It is not your turn");
    assert_eq!(
        PlacementError::InvalidPosition(42).to_string(),
        "Position 42 is outside the plateau"
    );
}
