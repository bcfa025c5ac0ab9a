//! Snapshot schema - the JSON shape front ends and tools consume

use serde_json::Value;

use tui_match3::core::{BuiltinLevels, GameSnapshot, PlaySession};
use tui_match3::types::{Coord, UiAction, EMPTY_TILE};

#[test]
fn test_snapshot_json_keys() {
    let session = PlaySession::new(BuiltinLevels, 1, 0xACE1).unwrap();
    let value = serde_json::to_value(session.snapshot()).unwrap();
    let obj = value.as_object().unwrap();

    for key in [
        "tiles",
        "background",
        "score",
        "moves_remaining",
        "jelly_remaining",
        "level",
        "seed",
        "won",
        "lost",
        "cursor",
        "selected",
    ] {
        assert!(obj.contains_key(key), "missing {}", key);
    }
    assert_eq!(obj.len(), 11);

    let tiles = obj["tiles"].as_array().unwrap();
    assert_eq!(tiles.len(), 9);
    assert!(tiles.iter().all(|row| row.as_array().unwrap().len() == 9));
    assert_eq!(obj["moves_remaining"], Value::from(20));
    assert_eq!(obj["level"], Value::from(1));
    assert_eq!(obj["cursor"]["x"], Value::from(4));
    assert_eq!(obj["cursor"]["y"], Value::from(4));
}

#[test]
fn test_level_one_background_codes() {
    let session = PlaySession::new(BuiltinLevels, 1, 1).unwrap();
    let snap = session.snapshot();

    assert_eq!(snap.background_at(Coord::new(0, 7)), 1);
    assert_eq!(snap.background_at(Coord::new(4, 7)), 0);
    assert_eq!(snap.background_at(Coord::new(4, 8)), 2);
    assert_eq!(snap.jelly_remaining, 13);
    assert!(!snap.finished());
}

#[test]
fn test_snapshot_deserializes_back() {
    let mut session = PlaySession::new(BuiltinLevels, 2, 77).unwrap();
    session.apply_action(UiAction::Select).unwrap();
    let snap = session.snapshot();

    let text = serde_json::to_string(&snap).unwrap();
    let back: GameSnapshot = serde_json::from_str(&text).unwrap();

    assert_eq!(back, snap);
    assert!(back.selected);
}

#[test]
fn test_default_snapshot_is_blank() {
    let mut snap = GameSnapshot::default();
    assert!(snap.tiles.iter().flatten().all(|&t| t == EMPTY_TILE));
    assert_eq!(snap.cursor, None);

    snap.score = 99;
    snap.won = true;
    snap.clear();
    assert_eq!(snap, GameSnapshot::default());
}
