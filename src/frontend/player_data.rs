//! Player data published by the snapshot source and consumed by panes.
//!
//! The app writes to it from `process_player_messages()`.
//! Panes read from it via `shared.player`.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::types::PlayerState;

/// Latest player snapshot plus bookkeeping for change detection.
#[derive(Debug, Default)]
pub struct PlayerData {
    /// Current snapshot (empty until the first one arrives)
    pub state: PlayerState,

    /// Incremented each time a snapshot is accepted.
    /// Panes compare against their last-seen value to rebuild views.
    pub generation: u64,

    /// File the current snapshot was read from
    pub snapshot_path: Option<PathBuf>,

    /// When the current snapshot was accepted
    pub loaded_at: Option<DateTime<Local>>,
}

impl PlayerData {
    /// Replace the current snapshot.
    pub fn apply_snapshot(&mut self, state: PlayerState, path: PathBuf) {
        self.state = state;
        self.snapshot_path = Some(path);
        self.loaded_at = Some(Local::now());
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot_path.is_some()
    }
}
