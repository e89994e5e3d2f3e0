//! Tests for dead-state detection.

use plateau_sync::{
    ClientEvent, GameSnapshot, GameStateLoaded, Lifecycle, SessionJoined, TurnStarted, TurnSync,
    is_dead_state,
};

fn connected() -> GameSnapshot {
    GameSnapshot::new()
        .with_session_id(Some("s1".to_string()))
        .with_player_id(Some("p1".to_string()))
        .with_has_session(true)
}

#[test]
fn test_session_without_game_state_is_dead() {
    assert!(is_dead_state(&connected()));
    assert_eq!(Lifecycle::of(&connected()), Lifecycle::Connected);
}

#[test]
fn test_disconnected_is_not_dead() {
    assert!(!is_dead_state(&GameSnapshot::new()));
}

#[test]
fn test_finished_is_not_dead() {
    assert!(!is_dead_state(&connected().with_game_state_is_finished(true)));
}

#[test]
fn test_waiting_for_turn_is_not_dead() {
    // Not our turn and no tile: the poll loop resolves this.
    let waiting = connected()
        .with_has_game_state(true)
        .with_my_turn(false)
        .with_current_tile(None);
    assert!(!is_dead_state(&waiting));
}

#[test]
fn test_game_state_clears_dead_regardless_of_other_fields() {
    let odd = connected()
        .with_has_game_state(true)
        .with_my_turn(true)
        .with_loading(true)
        .with_show_tile_picker(true);
    assert!(!is_dead_state(&odd));
}

#[test]
fn test_join_then_load_recovers() {
    let sync = TurnSync::default();
    let joined = sync.apply(
        &GameSnapshot::new(),
        &ClientEvent::SessionJoined(SessionJoined {
            session_id: "s1".to_string(),
            player_id: "p1".to_string(),
            ..SessionJoined::default()
        }),
    );
    assert!(is_dead_state(joined.snapshot()));

    let loaded = sync.apply(
        joined.snapshot(),
        &ClientEvent::GameStateLoaded(GameStateLoaded::default()),
    );
    assert!(!is_dead_state(loaded.snapshot()));
    assert_eq!(Lifecycle::of(loaded.snapshot()), Lifecycle::InProgress);
}

#[test]
fn test_turn_start_does_not_mask_missing_game_state() {
    let sync = TurnSync::default();
    let joined = sync.apply(
        &GameSnapshot::new(),
        &ClientEvent::SessionJoined(SessionJoined {
            session_id: "s1".to_string(),
            player_id: "p1".to_string(),
            ..SessionJoined::default()
        }),
    );

    for waiting in [vec!["p2".to_string()], vec!["p1".to_string()]] {
        let turn = ClientEvent::TurnStarted(TurnStarted {
            tile: "168".to_string(),
            turn_number: 1,
            positions: vec![0, 1],
            waiting,
            ..TurnStarted::default()
        });
        let next = sync.apply(joined.snapshot(), &turn);
        assert!(!next.snapshot().has_game_state());
        assert!(is_dead_state(next.snapshot()));
    }
}
