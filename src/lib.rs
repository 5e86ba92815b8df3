//! # TopicVis-RS: Player Topic Inspector
//!
//! A debugging tool for a robotics-data player. Its main panel, "Internals",
//! shows the player's active subscriptions and publishers grouped by the
//! panel or node that requested them, sorted for quick scanning by QA.
//!
//! ## Architecture
//!
//! - **Internals**: Pure grouping/labelling logic and a render-agnostic view tree
//! - **Player**: Snapshot source thread feeding [`PlayerState`] snapshots
//! - **Frontend**: Renders the UI using eframe/egui with an egui_dock workspace
//! - **Communication**: Crossbeam channels for thread-safe data transfer
//!
//! ## Configuration
//!
//! Configuration and UI session state are stored in the platform-appropriate
//! data directory under `dev.topicvis.topicvis-rs`:
//!
//! - **Linux**: `~/.local/share/dev.topicvis.topicvis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.topicvis.topicvis-rs/`
//! - **Windows**: `%APPDATA%\dev.topicvis.topicvis-rs\`
//!
//! ## Example
//!
//! ```
//! use topicvis_rs::internals::{build_view, render_text};
//! use topicvis_rs::types::{PlayerState, Requester, SubscribePayload};
//!
//! let state = PlayerState {
//!     subscriptions: vec![
//!         SubscribePayload::new("/b", Some(Requester::Node("N1".into()))),
//!         SubscribePayload::new("/a", Some(Requester::Node("N1".into()))),
//!     ],
//!     ..Default::default()
//! };
//!
//! let text = render_text(&build_view(&state));
//! assert!(text.starts_with("Subscriptions\nNode \"N1\":\n  /a\n  /b\n"));
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod internals;
pub mod player;
pub mod types;

// Re-export commonly used types
pub use app::TopicVisApp;
pub use config::{AppConfig, UiSessionState};
pub use error::{Result, TopicVisError};
pub use internals::{build_view, render_text, InternalsView};
pub use player::{PlayerBridge, SnapshotSource};
pub use types::{AdvertisePayload, Advertiser, PlayerState, Requester, SubscribePayload, Topic};
