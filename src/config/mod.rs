//! Configuration module for TopicVis-RS
//!
//! This module handles application configuration including:
//! - The application config file (`config.toml`)
//! - UI session persistence (window, workspace layout, recent snapshots)
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.topicvis.topicvis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.topicvis.topicvis-rs/`
//! - **Windows**: `%APPDATA%\dev.topicvis.topicvis-rs\`
//!
//! # Files
//!
//! - `config.toml` - Snapshot source, polling and logging preferences
//! - `ui_session.json` - Window state and workspace layout
//! - `logs/` - Rolling log files (when `log_to_file` is enabled)
//!
//! # Example
//!
//! ```ignore
//! use topicvis_rs::config::AppConfig;
//!
//! let mut config = AppConfig::load_or_default(None);
//! config.poll_interval_ms = 250;
//! config.save_to(&topicvis_rs::config::config_path().unwrap())?;
//! ```

pub mod ui_session;

pub use ui_session::*;

use crate::error::{Result, TopicVisError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.topicvis.topicvis-rs";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Log directory name inside the app data directory
pub const LOG_DIR: &str = "logs";

/// Default interval between snapshot file modification checks
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Lower bound for the poll interval
pub const MIN_POLL_INTERVAL_MS: u64 = 50;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        TopicVisError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            TopicVisError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// Get the path to the log directory
pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(LOG_DIR))
}

// ==================== App Config ====================

/// Application configuration, stored as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Snapshot file to open on startup
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// How often the snapshot source checks the file for changes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Also write logs to rolling files in the app data directory
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            dark_mode: true,
            log_to_file: false,
        }
    }
}

impl AppConfig {
    /// Load a config file from disk
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TopicVisError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            TopicVisError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Load from `path` (or the default location), returning defaults on any error.
    ///
    /// A missing file is not an error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config as TOML
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    TopicVisError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TopicVisError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TopicVisError::Config(format!("Failed to write config: {}", e)))
    }

    /// Poll interval, clamped to [`MIN_POLL_INTERVAL_MS`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}
