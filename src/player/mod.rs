//! Player snapshot feed.
//!
//! The real player is out of scope; this module delivers [`PlayerState`]
//! snapshots to the UI thread the way a player would, over crossbeam
//! channels.
//!
//! [`PlayerState`]: crate::types::PlayerState

pub mod bridge;
pub mod source;

pub use bridge::{PlayerBridge, PlayerCommand, PlayerMessage};
pub use source::{load_snapshot, SnapshotSource};
