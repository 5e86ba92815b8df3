//! TabViewer implementation for the workspace
//!
//! Dispatches rendering to pane state objects through the [`Pane`] trait.

use std::collections::HashMap;

use egui::{Ui, WidgetText};

use crate::frontend::pane_trait::Pane;
use crate::frontend::player_data::PlayerData;
use crate::frontend::state::{AppAction, SharedState};

use super::{PaneEntry, PaneId};

/// Tab viewer that bridges egui_dock with our pane system.
///
/// Holds borrows to all shared state fields so that SharedState can be
/// constructed per-frame inside ui().
pub struct WorkspaceTabViewer<'a> {
    pub player: &'a PlayerData,
    // Workspace state
    pub pane_states: &'a mut HashMap<PaneId, Box<dyn Pane>>,
    pub pane_entries: &'a HashMap<PaneId, PaneEntry>,
    pub actions: Vec<AppAction>,
}

impl egui_dock::TabViewer for WorkspaceTabViewer<'_> {
    type Tab = PaneId;

    fn title(&mut self, tab: &mut PaneId) -> WidgetText {
        self.pane_entries
            .get(tab)
            .map(|e| WidgetText::from(&e.title))
            .unwrap_or_else(|| WidgetText::from("Unknown"))
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut PaneId) {
        let Some(state) = self.pane_states.get_mut(tab) else {
            ui.label("Pane state not found");
            return;
        };

        let mut shared = SharedState {
            player: self.player,
        };

        let pane_actions = state.render(&mut shared, ui);
        self.actions.extend(pane_actions);
    }

    fn on_close(&mut self, tab: &mut PaneId) -> egui_dock::widgets::tab_viewer::OnCloseResponse {
        // Allow closing; cleanup happens in the main app
        self.actions.push(AppAction::ClosePane(*tab));
        egui_dock::widgets::tab_viewer::OnCloseResponse::Close
    }

    fn closeable(&mut self, _tab: &mut PaneId) -> bool {
        true
    }
}
