//! Thread boundary between the snapshot source and the UI.
//!
//! The UI owns a [`PlayerBridge`]; the source thread owns the other ends of
//! both channels.

use std::path::PathBuf;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::error::{Result, TopicVisError};
use crate::types::PlayerState;

/// Channel capacity for UI → source commands
pub const CMD_CHANNEL_CAPACITY: usize = 16;

/// Channel capacity for source → UI messages
pub const MSG_CHANNEL_CAPACITY: usize = 64;

/// Commands sent from the UI to the snapshot source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Watch a different snapshot file and load it now
    Open(PathBuf),
    /// Reload the current file even if it did not change
    Reload,
    /// Stop the source thread
    Shutdown,
}

/// Messages sent from the snapshot source to the UI.
#[derive(Debug, Clone)]
pub enum PlayerMessage {
    /// A new snapshot was loaded.
    Snapshot { state: PlayerState, path: PathBuf },

    /// Loading failed; the previous snapshot stays current.
    LoadError(String),

    /// The source is shutting down.
    Shutdown,
}

/// UI-side handle for communicating with the snapshot source thread.
pub struct PlayerBridge {
    pub cmd_tx: Sender<PlayerCommand>,
    pub msg_rx: Receiver<PlayerMessage>,
}

impl PlayerBridge {
    /// Create a new bridge pair: `(bridge_for_ui, cmd_rx, msg_tx)`.
    ///
    /// The source thread owns `cmd_rx` and `msg_tx`.
    pub fn new() -> (Self, Receiver<PlayerCommand>, Sender<PlayerMessage>) {
        let (cmd_tx, cmd_rx) = bounded(CMD_CHANNEL_CAPACITY);
        let (msg_tx, msg_rx) = bounded(MSG_CHANNEL_CAPACITY);
        (Self { cmd_tx, msg_rx }, cmd_rx, msg_tx)
    }

    /// Drain all pending messages.
    pub fn drain(&self) -> Vec<PlayerMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    /// Send a command; fails once the source thread has exited.
    pub fn send_command(&self, cmd: PlayerCommand) -> Result<()> {
        self.cmd_tx.send(cmd).map_err(|e| {
            tracing::warn!("Snapshot source is gone, dropping {:?}", e.0);
            TopicVisError::Channel("snapshot source disconnected".to_string())
        })
    }

    pub fn open(&self, path: PathBuf) -> Result<()> {
        self.send_command(PlayerCommand::Open(path))
    }

    pub fn reload(&self) -> Result<()> {
        self.send_command(PlayerCommand::Reload)
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(PlayerCommand::Shutdown);
    }
}
