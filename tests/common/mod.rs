//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::path::{Path, PathBuf};
use std::time::Duration;

use topicvis_rs::PlayerState;

/// Create a test timeout duration
pub fn test_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Write a snapshot as JSON into `dir` and return its path
pub fn write_snapshot(dir: &Path, name: &str, state: &PlayerState) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(state).expect("serialize snapshot");
    std::fs::write(&path, json).expect("write snapshot");
    path
}
