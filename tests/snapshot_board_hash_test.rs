use puyo_engine::core::snapshot::fnv1a64_board;
use puyo_engine::core::{GameSession, GameSnapshot};
use puyo_engine::types::{Action, SessionState};

#[test]
fn snapshot_into_sets_board_hash() {
    let mut session = GameSession::with_seed(1);
    session.spawn_next();

    let mut snap = GameSnapshot::default();
    session.snapshot_into(&mut snap);
    assert_eq!(snap.board_hash, fnv1a64_board(&snap.board));
    let empty_hash = snap.board_hash;

    assert!(session.apply_action(Action::HardDrop));
    session.snapshot_into(&mut snap);

    assert_eq!(snap.board_hash, fnv1a64_board(&snap.board));
    assert_ne!(snap.board_hash, empty_hash);
}

#[test]
fn snapshot_tracks_pairs_and_state() {
    let mut session = GameSession::with_seed(9);
    let current = session.current_pair();
    let next = session.next_pair();

    let waiting = session.snapshot();
    assert_eq!(waiting.state, SessionState::Spawning);
    assert!(waiting.active.is_none());
    assert_eq!(waiting.current, current);
    assert_eq!(waiting.next, next);

    session.spawn_next();
    let active = session.snapshot().active.unwrap();
    assert_eq!(active.colors, current);
    assert_eq!((active.x, active.y), (2, 0));
}

#[test]
fn snapshot_serializes_to_json() {
    let mut session = GameSession::with_seed(3);
    session.spawn_next();

    let value = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(value["state"], "active");
    assert_eq!(value["score"], 0);
    assert_eq!(value["active"]["orientation"], "down");
    assert_eq!(value["board"].as_array().unwrap().len(), 12);
}

#[test]
fn default_snapshot_matches_fresh_session_board() {
    let fresh = GameSnapshot::default();
    let session = GameSession::with_seed(3).snapshot();

    assert_eq!(fresh.board, session.board);
    assert_eq!(fresh.board_hash, session.board_hash);
    assert!(fresh.playable());
}
