//! Integration tests for the snapshot source thread
//!
//! These tests run a real source thread against files in a temp directory
//! and observe it through the UI side of the bridge.

mod common;

use std::time::Duration;

use common::builders::{node, panel_advertiser, PlayerStateBuilder};
use topicvis_rs::player::{PlayerBridge, PlayerMessage, SnapshotSource};

fn recv(bridge: &PlayerBridge) -> PlayerMessage {
    bridge
        .msg_rx
        .recv_timeout(common::test_timeout())
        .expect("no message from snapshot source")
}

#[test]
fn test_open_switches_watched_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = PlayerStateBuilder::new().subscription("/a", node("N1")).build();
    let second = PlayerStateBuilder::new()
        .publisher("/cmd", panel_advertiser("Publish"))
        .build();
    let first_path = common::write_snapshot(dir.path(), "first.json", &first);
    let second_path = common::write_snapshot(dir.path(), "second.json", &second);

    let (bridge, cmd_rx, msg_tx) = PlayerBridge::new();
    let handle = SnapshotSource::new(cmd_rx, msg_tx, Duration::from_secs(60))
        .with_initial_snapshot(Some(first_path.clone()))
        .spawn()
        .unwrap();

    match recv(&bridge) {
        PlayerMessage::Snapshot { state, path } => {
            assert_eq!(path, first_path);
            assert_eq!(state, first);
        }
        other => panic!("unexpected message: {:?}", other),
    }

    bridge.open(second_path.clone()).unwrap();
    match recv(&bridge) {
        PlayerMessage::Snapshot { state, path } => {
            assert_eq!(path, second_path);
            assert_eq!(state, second);
        }
        other => panic!("unexpected message: {:?}", other),
    }

    bridge.shutdown();
    assert!(matches!(recv(&bridge), PlayerMessage::Shutdown));
    handle.join().unwrap();
}

#[test]
fn test_reload_reports_invalid_file_without_stopping() {
    let dir = tempfile::tempdir().unwrap();
    let state = PlayerStateBuilder::new().subscription("/a", None).build();
    let path = common::write_snapshot(dir.path(), "player.json", &state);

    let (bridge, cmd_rx, msg_tx) = PlayerBridge::new();
    let handle = SnapshotSource::new(cmd_rx, msg_tx, Duration::from_secs(60))
        .with_initial_snapshot(Some(path.clone()))
        .spawn()
        .unwrap();
    assert!(matches!(recv(&bridge), PlayerMessage::Snapshot { .. }));

    std::fs::write(&path, r#"{"subscriptions": [{"topic": ""}]}"#).unwrap();
    bridge.reload().unwrap();
    match recv(&bridge) {
        PlayerMessage::LoadError(err) => assert!(err.contains("empty topic")),
        other => panic!("unexpected message: {:?}", other),
    }

    // Still serving after the error
    common::write_snapshot(dir.path(), "player.json", &state);
    bridge.reload().unwrap();
    assert!(matches!(recv(&bridge), PlayerMessage::Snapshot { .. }));

    drop(bridge);
    handle.join().unwrap();
}

#[test]
fn test_new_file_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.json");

    let (bridge, cmd_rx, msg_tx) = PlayerBridge::new();
    let handle = SnapshotSource::new(cmd_rx, msg_tx, Duration::from_millis(50))
        .with_initial_snapshot(Some(path.clone()))
        .spawn()
        .unwrap();

    // Missing file on startup is reported, then the file appears
    assert!(matches!(recv(&bridge), PlayerMessage::LoadError(_)));
    let state = PlayerStateBuilder::new().subscription("/late", node("N")).build();
    let staged = common::write_snapshot(dir.path(), "late.json.tmp", &state);
    std::fs::rename(staged, &path).unwrap();

    let loaded = loop {
        match recv(&bridge) {
            PlayerMessage::Snapshot { state, .. } => break state,
            PlayerMessage::LoadError(_) => continue,
            PlayerMessage::Shutdown => panic!("source stopped early"),
        }
    };
    assert_eq!(loaded, state);

    bridge.shutdown();
    handle.join().unwrap();
}

#[test]
fn test_back_to_back_rewrites_end_on_latest() {
    let dir = tempfile::tempdir().unwrap();
    let first = PlayerStateBuilder::new().subscription("/v1", node("N")).build();
    let path = common::write_snapshot(dir.path(), "player.json", &first);

    let (bridge, cmd_rx, msg_tx) = PlayerBridge::new();
    let handle = SnapshotSource::new(cmd_rx, msg_tx, Duration::from_millis(50))
        .with_initial_snapshot(Some(path.clone()))
        .spawn()
        .unwrap();
    assert!(matches!(recv(&bridge), PlayerMessage::Snapshot { .. }));

    // Both writes land within the same mtime tick on coarse filesystems
    let second = PlayerStateBuilder::new().subscription("/v2", node("N")).build();
    let third = PlayerStateBuilder::new().subscription("/v3", node("N")).build();
    common::write_snapshot(dir.path(), "player.json", &second);
    common::write_snapshot(dir.path(), "player.json", &third);

    loop {
        match recv(&bridge) {
            PlayerMessage::Snapshot { state, .. } if state == third => break,
            PlayerMessage::Shutdown => panic!("source stopped early"),
            _ => continue,
        }
    }

    bridge.shutdown();
    handle.join().unwrap();
}
