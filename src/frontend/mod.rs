//! Frontend module for egui UI
//!
//! This module provides the main UI using eframe/egui. It receives player
//! snapshots from the snapshot source through crossbeam channels and renders
//! them in dockable panes.
//!
//! # Architecture
//!
//! The frontend uses an egui_dock workspace where every panel is a pane.
//! Pane kinds are registered in [`pane_registry`] under a fixed panel type
//! identifier, which is also what the persisted layout stores.
//!
//! # Main Types
//!
//! - [`TopicVisApp`] - Main application state implementing [`eframe::App`]
//! - [`Workspace`](workspace::Workspace) - Dock state and pane management
//! - [`PlayerData`] - Latest snapshot shared with all panes
//!
//! # Submodules
//!
//! - `workspace` - Dock workspace, tab viewer, default layout
//! - `panes` - Individual pane render functions
//! - `toolbar` - Floating per-panel toolbar
//! - `status_bar` - Bottom status bar

pub mod pane_registry;
pub mod pane_trait;
pub mod panes;
pub mod player_data;
pub mod state;
pub mod status_bar;
pub mod toolbar;
pub mod workspace;

pub use player_data::PlayerData;
pub use state::{AppAction, SharedState};

use status_bar::{render_status_bar, StatusBarContext};
use workspace::tab_viewer::WorkspaceTabViewer;
use workspace::Workspace;

use crate::config::{AppConfig, UiSessionState};
use crate::player::{PlayerBridge, PlayerMessage};

/// Main application state for the topic inspector
pub struct TopicVisApp {
    // === Communication ===
    bridge: PlayerBridge,

    // === Shared State ===
    config: AppConfig,
    session: UiSessionState,
    last_error: Option<String>,

    // === Published data ===
    player: PlayerData,

    // === Workspace ===
    workspace: Workspace,
}

impl TopicVisApp {
    /// Create the app, restoring the persisted workspace layout when possible.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        bridge: PlayerBridge,
        config: AppConfig,
        session: UiSessionState,
    ) -> Self {
        let workspace = session
            .workspace_layout
            .as_ref()
            .and_then(|layout| match Workspace::from_serialized_layout(layout) {
                Ok(workspace) => Some(workspace),
                Err(e) => {
                    tracing::warn!("Discarding saved workspace layout: {}", e);
                    None
                }
            })
            .unwrap_or_else(Workspace::with_default_layout);

        Self {
            bridge,
            config,
            session,
            last_error: None,
            player: PlayerData::default(),
            workspace,
        }
    }

    /// Apply pending snapshot source messages. Returns true if any arrived.
    fn process_player_messages(&mut self) -> bool {
        let messages = self.bridge.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                PlayerMessage::Snapshot { state, path } => {
                    self.session.add_recent_snapshot(&path);
                    self.player.apply_snapshot(state, path);
                    self.last_error = None;
                }
                PlayerMessage::LoadError(err) => {
                    self.last_error = Some(err);
                }
                PlayerMessage::Shutdown => {
                    tracing::info!("Snapshot source shutdown received");
                }
            }
        }

        had_messages
    }

    fn handle_action(&mut self, action: AppAction, ctx: &egui::Context) {
        match action {
            AppAction::OpenSnapshot(path) => {
                tracing::info!("Opening snapshot {:?}", path);
                if let Err(e) = self.bridge.open(path) {
                    self.last_error = Some(e.to_string());
                }
            }
            AppAction::ReloadSnapshot => {
                if let Err(e) = self.bridge.reload() {
                    self.last_error = Some(e.to_string());
                }
            }
            AppAction::CopyText(text) => ctx.copy_text(text),
            AppAction::NewPane(kind) => {
                if self.workspace.open_new_pane(kind).is_none() {
                    self.last_error = Some(format!("Cannot create {:?} pane", kind));
                }
            }
            AppAction::ClosePane(id) => self.workspace.remove_pane(id),
        }
    }

    fn remember_window_state(&mut self, ctx: &egui::Context) {
        let window = &mut self.session.window;
        ctx.input(|i| {
            let viewport = i.viewport();
            if let Some(rect) = viewport.inner_rect {
                window.size = (rect.width() as u32, rect.height() as u32);
            }
            if let Some(rect) = viewport.outer_rect {
                window.position = Some((rect.min.x as i32, rect.min.y as i32));
            }
            if let Some(maximized) = viewport.maximized {
                window.maximized = maximized;
            }
        });
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Snapshot...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Player snapshot", &["json"])
                            .pick_file()
                        {
                            actions.push(AppAction::OpenSnapshot(path));
                        }
                        ui.close();
                    }

                    ui.menu_button("Open Recent", |ui| {
                        if self.session.recent_snapshots.is_empty() {
                            ui.weak("No recent snapshots");
                        }
                        for path in &self.session.recent_snapshots {
                            if ui.button(path.display().to_string()).clicked() {
                                actions.push(AppAction::OpenSnapshot(path.clone()));
                                ui.close();
                            }
                        }
                    });

                    if ui
                        .add_enabled(self.player.has_snapshot(), egui::Button::new("Reload"))
                        .clicked()
                    {
                        actions.push(AppAction::ReloadSnapshot);
                        ui.close();
                    }
                });

                ui.menu_button("View", |ui| {
                    // Pane kinds from the registry
                    let kinds: Vec<_> = self
                        .workspace
                        .registry_kinds()
                        .map(|info| (info.kind, info.display_name))
                        .collect();
                    for (kind, name) in kinds {
                        if ui.button(format!("New {}", name)).clicked() {
                            actions.push(AppAction::NewPane(kind));
                            ui.close();
                        }
                    }

                    ui.separator();
                    ui.checkbox(&mut self.session.show_status_bar, "Status Bar");
                });
            });
        });

        actions
    }
}

impl eframe::App for TopicVisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.process_player_messages() {
            ctx.request_repaint();
        }
        // Keep draining the bridge while idle
        ctx.request_repaint_after(self.config.poll_interval());

        self.remember_window_state(ctx);

        let menu_actions = self.render_menu_bar(ctx);
        for action in menu_actions {
            self.handle_action(action, ctx);
        }

        if self.session.show_status_bar {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                render_status_bar(
                    ui,
                    &StatusBarContext {
                        player: &self.player,
                        last_error: self.last_error.as_deref(),
                    },
                );
            });
        }

        // Dock workspace
        {
            let mut viewer = WorkspaceTabViewer {
                player: &self.player,
                pane_states: &mut self.workspace.pane_states,
                pane_entries: &self.workspace.pane_entries,
                actions: Vec::new(),
            };

            egui_dock::DockArea::new(&mut self.workspace.dock_state)
                .style(egui_dock::Style::from_egui(ctx.style().as_ref()))
                .show(ctx, &mut viewer);

            let actions = viewer.actions;
            for action in actions {
                self.handle_action(action, ctx);
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.bridge.shutdown();

        match self.workspace.to_serialized_layout() {
            Ok(layout) => self.session.workspace_layout = Some(layout),
            Err(e) => tracing::warn!("Failed to serialize workspace layout: {}", e),
        }

        if let Err(e) = self.session.save() {
            tracing::warn!("Failed to save UI session: {}", e);
        }
    }
}
