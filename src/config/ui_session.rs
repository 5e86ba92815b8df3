//! UI session state persistence
//!
//! Session state includes window position/size, workspace layout and the
//! snapshot files that were open. It is saved automatically on exit and is
//! not meant to be portable between machines.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{app_data_dir, ensure_app_data_dir};
use crate::error::{Result, TopicVisError};

/// UI session state filename
pub const UI_SESSION_FILE: &str = "ui_session.json";

/// Maximum number of recent snapshot files to remember
pub const MAX_RECENT_SNAPSHOTS: usize = 10;

/// Session file format written by this build
pub const UI_SESSION_VERSION: u32 = 1;

/// UI session state persisted between app launches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSessionState {
    /// Format version; files from a newer build are not loaded
    #[serde(default = "default_version")]
    pub version: u32,

    /// Window state
    #[serde(default)]
    pub window: WindowState,

    /// Workspace layout (serialized DockState)
    #[serde(default)]
    pub workspace_layout: Option<SerializedWorkspaceLayout>,

    #[serde(default = "default_true")]
    pub show_status_bar: bool,

    /// Last opened snapshot (for auto-restore)
    #[serde(default)]
    pub last_snapshot_path: Option<PathBuf>,

    /// Most recent first
    #[serde(default)]
    pub recent_snapshots: Vec<PathBuf>,
}

fn default_version() -> u32 {
    UI_SESSION_VERSION
}

fn default_true() -> bool {
    true
}

impl Default for UiSessionState {
    fn default() -> Self {
        Self {
            version: UI_SESSION_VERSION,
            window: WindowState::default(),
            workspace_layout: None,
            show_status_bar: true,
            last_snapshot_path: None,
            recent_snapshots: Vec::new(),
        }
    }
}

impl UiSessionState {
    /// Load UI session state from default location
    pub fn load() -> Self {
        match app_data_dir().map(|p| p.join(UI_SESSION_FILE)) {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load UI session state from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content).map_err(|e| {
            TopicVisError::Config(format!("Failed to parse UI session state: {}", e))
        })?;
        if state.version > UI_SESSION_VERSION {
            return Err(TopicVisError::Config(format!(
                "UI session version {} is newer than supported version {}",
                state.version, UI_SESSION_VERSION
            )));
        }
        tracing::info!("Loaded UI session state from {:?}", path);
        Ok(state)
    }

    /// Save UI session state to default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(UI_SESSION_FILE))
    }

    /// Save UI session state to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TopicVisError::Config(format!("Failed to serialize UI session: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TopicVisError::Config(format!("Failed to write UI session: {}", e)))?;

        tracing::debug!("Saved UI session state to {:?}", path);
        Ok(())
    }

    /// Record a snapshot file as the most recently opened one
    pub fn add_recent_snapshot(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();

        self.recent_snapshots.retain(|p| *p != path);
        self.recent_snapshots.insert(0, path.clone());
        self.recent_snapshots.truncate(MAX_RECENT_SNAPSHOTS);

        self.last_snapshot_path = Some(path);
    }

    /// Drop recent snapshots whose files no longer exist
    pub fn cleanup_missing_snapshots(&mut self) {
        self.recent_snapshots.retain(|p| p.exists());

        if let Some(ref last) = self.last_snapshot_path {
            if !last.exists() {
                self.last_snapshot_path = None;
            }
        }
    }
}

/// Window position and size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    /// Window position (x, y) - None means let OS decide
    #[serde(default)]
    pub position: Option<(i32, i32)>,
    /// Window size (width, height)
    #[serde(default = "default_window_size")]
    pub size: (u32, u32),
    /// Whether window is maximized
    #[serde(default)]
    pub maximized: bool,
}

fn default_window_size() -> (u32, u32) {
    (1024, 640)
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            position: None,
            size: default_window_size(),
            maximized: false,
        }
    }
}

/// Serialized workspace layout that can be stored as JSON
///
/// This stores both the dock structure and the pane metadata needed to
/// reconstruct the workspace on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedWorkspaceLayout {
    /// The serialized dock state JSON
    pub dock_json: String,
    /// Pane metadata for reconstruction
    pub panes: Vec<SerializedPane>,
}

/// Serialized pane metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedPane {
    /// Pane ID (u64)
    pub id: u64,
    /// Registered panel type, e.g. `"Internals"`
    pub panel_type: String,
    /// Pane title
    pub title: String,
}
