//! Snapshot source thread.
//!
//! Stands in for the player: reads a [`PlayerState`] snapshot from a JSON
//! file and republishes it whenever the file changes on disk. Changes are
//! reported by `notify`, watching the file's parent directory so that
//! editors which replace the file by renaming are still followed.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{after, never, select, unbounded, Receiver, Sender};
use notify::{Event, EventKind, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{Result, ResultExt, TopicVisError};
use crate::player::bridge::{PlayerCommand, PlayerMessage};
use crate::types::PlayerState;

type FsEvent = notify::Result<Event>;

/// Read and validate a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<PlayerState> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TopicVisError::Snapshot(format!("Failed to read {:?}: {}", path, e)))?;
    PlayerState::from_json(&content).with_context(|| format!("Loading snapshot {:?}", path))
}

/// Directory to watch for changes to `file`.
fn watch_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether `event` may have changed `file`.
fn touches(event: &Event, file: &Path) -> bool {
    let Some(name) = file.file_name() else {
        return false;
    };
    !matches!(event.kind, EventKind::Access(_))
        && event.paths.iter().any(|p| p.file_name() == Some(name))
}

fn forward_to(tx: &Sender<FsEvent>) -> impl FnMut(FsEvent) + Send + 'static {
    let tx = tx.clone();
    move |event| {
        if tx.send(event).is_err() {
            tracing::trace!("Snapshot source gone, dropping file event");
        }
    }
}

/// File watcher following the directory of the current snapshot.
struct DirWatch {
    watcher: Option<Box<dyn Watcher>>,
    dir: Option<PathBuf>,
}

impl DirWatch {
    /// Native watcher, or a polling one where the platform has none.
    fn start(fs_tx: &Sender<FsEvent>, poll_interval: Duration) -> Self {
        let watcher: Option<Box<dyn Watcher>> =
            match RecommendedWatcher::new(forward_to(fs_tx), notify::Config::default()) {
                Ok(watcher) => Some(Box::new(watcher)),
                Err(e) => {
                    tracing::warn!("Native file watcher unavailable ({}), polling instead", e);
                    let config = notify::Config::default().with_poll_interval(poll_interval);
                    match PollWatcher::new(forward_to(fs_tx), config) {
                        Ok(watcher) => Some(Box::new(watcher)),
                        Err(e) => {
                            tracing::warn!("Snapshot file watching disabled: {}", e);
                            None
                        }
                    }
                }
            };
        Self { watcher, dir: None }
    }

    fn follow(&mut self, file: &Path) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        let dir = watch_dir(file);
        if self.dir.as_ref() == Some(&dir) {
            return;
        }

        if let Some(old) = self.dir.take() {
            if let Err(e) = watcher.unwatch(&old) {
                tracing::debug!("Failed to unwatch {:?}: {}", old, e);
            }
        }
        match watcher.watch(&dir, RecursiveMode::NonRecursive) {
            Ok(()) => {
                tracing::debug!("Watching {:?} for snapshot changes", dir);
                self.dir = Some(dir);
            }
            Err(e) => tracing::warn!("Cannot watch {:?}: {}", dir, e),
        }
    }
}

enum Step {
    Command(Option<PlayerCommand>),
    FileEvent(FsEvent),
    Settled,
}

/// Watches one snapshot file and feeds the UI through the bridge channels.
pub struct SnapshotSource {
    cmd_rx: Receiver<PlayerCommand>,
    msg_tx: Sender<PlayerMessage>,
    debounce: Duration,
    watched: Option<PathBuf>,
}

impl SnapshotSource {
    /// `debounce` is how long file events must stay quiet before a reload.
    pub fn new(
        cmd_rx: Receiver<PlayerCommand>,
        msg_tx: Sender<PlayerMessage>,
        debounce: Duration,
    ) -> Self {
        Self {
            cmd_rx,
            msg_tx,
            debounce,
            watched: None,
        }
    }

    /// File to load as soon as the thread starts
    pub fn with_initial_snapshot(mut self, path: Option<PathBuf>) -> Self {
        self.watched = path;
        self
    }

    /// Run on a dedicated thread.
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let handle = std::thread::Builder::new()
            .name("snapshot-source".to_string())
            .spawn(move || self.run())?;
        Ok(handle)
    }

    /// Process commands and file events until `Shutdown` or until either side hangs up.
    pub fn run(mut self) {
        tracing::info!("Snapshot source started");

        let (fs_tx, fs_rx) = unbounded();
        let mut dir_watch = DirWatch::start(&fs_tx, self.debounce);
        if let Some(path) = &self.watched {
            dir_watch.follow(path);
        }

        let mut ui_alive = self.load();
        let mut pending_change = false;

        while ui_alive {
            let settle: Receiver<Instant> = if pending_change {
                after(self.debounce)
            } else {
                never()
            };

            let step = select! {
                recv(self.cmd_rx) -> cmd => Step::Command(cmd.ok()),
                recv(fs_rx) -> event => match event {
                    Ok(event) => Step::FileEvent(event),
                    Err(_) => Step::Command(None),
                },
                recv(settle) -> _ => Step::Settled,
            };

            ui_alive = match step {
                Step::Command(Some(PlayerCommand::Open(path))) => {
                    tracing::info!("Watching snapshot {:?}", path);
                    dir_watch.follow(&path);
                    self.watched = Some(path);
                    pending_change = false;
                    self.load()
                }
                Step::Command(Some(PlayerCommand::Reload)) => {
                    pending_change = false;
                    self.load()
                }
                Step::Command(Some(PlayerCommand::Shutdown)) | Step::Command(None) => break,
                Step::FileEvent(Ok(event)) => {
                    if let Some(path) = self.watched.as_deref() {
                        if touches(&event, path) {
                            tracing::trace!("Snapshot {:?} changed on disk: {:?}", path, event.kind);
                            pending_change = true;
                        }
                    }
                    true
                }
                Step::FileEvent(Err(e)) => {
                    tracing::warn!("File watcher error: {}", e);
                    true
                }
                Step::Settled => {
                    pending_change = false;
                    self.load()
                }
            };
        }

        drop(fs_tx);
        if self.msg_tx.send(PlayerMessage::Shutdown).is_err() {
            tracing::debug!("UI already gone");
        }
        tracing::info!("Snapshot source exiting");
    }

    /// Load the watched file and publish the outcome. Returns false once the UI is gone.
    fn load(&mut self) -> bool {
        let Some(path) = self.watched.clone() else {
            return true;
        };

        let msg = match load_snapshot(&path) {
            Ok(state) => {
                tracing::debug!(
                    topics = state.topics.len(),
                    subscriptions = state.subscriptions.len(),
                    publishers = state.publishers.len(),
                    "Loaded snapshot {:?}",
                    path
                );
                PlayerMessage::Snapshot { state, path }
            }
            Err(e) => {
                tracing::warn!("{}", e);
                PlayerMessage::LoadError(e.to_string())
            }
        };

        self.msg_tx.send(msg).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::bridge::PlayerBridge;

    const SNAPSHOT: &str = r#"{
        "topics": [{"name": "/a", "originalTopic": "/orig_a"}],
        "subscriptions": [{"topic": "/a", "requester": {"type": "panel", "name": "P"}}]
    }"#;

    #[test]
    fn test_load_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let state = load_snapshot(&path).unwrap();
        assert_eq!(state.subscriptions.len(), 1);
        assert!(state.publishers.is_empty());
    }

    #[test]
    fn test_load_snapshot_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_snapshot(&missing),
            Err(TopicVisError::Snapshot(_))
        ));
    }

    #[test]
    fn test_run_loads_initial_and_stops_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let (bridge, cmd_rx, msg_tx) = PlayerBridge::new();
        let source = SnapshotSource::new(cmd_rx, msg_tx, Duration::from_millis(50))
            .with_initial_snapshot(Some(path.clone()));

        bridge.shutdown();
        source.run();

        let msgs = bridge.drain();
        assert!(
            matches!(&msgs[0], PlayerMessage::Snapshot { path: p, state } if *p == path && state.topics.len() == 1)
        );
        assert!(matches!(msgs.last(), Some(PlayerMessage::Shutdown)));
    }

    #[test]
    fn test_run_exits_when_ui_drops_commands() {
        let (bridge, cmd_rx, msg_tx) = PlayerBridge::new();
        let source = SnapshotSource::new(cmd_rx, msg_tx, Duration::from_millis(50));
        let PlayerBridge { cmd_tx, msg_rx } = bridge;
        drop(cmd_tx);

        source.run();
        assert!(matches!(msg_rx.try_recv(), Ok(PlayerMessage::Shutdown)));
    }

    #[test]
    fn test_watch_dir_for_bare_file_name() {
        assert_eq!(watch_dir(Path::new("player.json")), PathBuf::from("."));
        assert_eq!(
            watch_dir(Path::new("/data/player.json")),
            PathBuf::from("/data")
        );
    }

    #[test]
    fn test_only_events_on_watched_file_count() {
        let file = Path::new("/data/player.json");
        let modify = |path: &str| {
            Event::new(EventKind::Modify(notify::event::ModifyKind::Any)).add_path(PathBuf::from(path))
        };

        assert!(touches(&modify("/data/player.json"), file));
        assert!(!touches(&modify("/data/player.json.tmp"), file));
        assert!(!touches(
            &Event::new(EventKind::Access(notify::event::AccessKind::Any))
                .add_path(PathBuf::from("/data/player.json")),
            file
        ));
    }
}
