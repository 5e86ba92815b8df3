//! Shared state types for the frontend
//!
//! Panes receive `SharedState` via borrowing and return `AppAction`s instead
//! of mutating application state directly.

use std::path::PathBuf;

use crate::frontend::player_data::PlayerData;

use super::workspace::{PaneId, PaneKind};

/// Shared state accessible by all panes (borrowed, not owned).
///
/// Panes only read the latest snapshot; everything they want changed goes
/// back to the app as an [`AppAction`].
pub struct SharedState<'a> {
    pub player: &'a PlayerData,
}

/// Actions that any pane can emit
///
/// Panes return `Vec<AppAction>` instead of mutating state directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    // Snapshot source
    /// Watch and load a snapshot file
    OpenSnapshot(PathBuf),
    /// Reload the current snapshot file
    ReloadSnapshot,

    // Clipboard
    /// Copy text to the system clipboard
    CopyText(String),

    // Workspace actions
    /// Create a new pane instance
    NewPane(PaneKind),
    /// Close a pane (remove from dock and clean up state)
    ClosePane(PaneId),
}
