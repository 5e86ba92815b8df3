//! Default workspace layout
//!
//! A single Internals pane filling the dock area.

use egui_dock::DockState;

use super::{PaneId, PaneKind, Workspace};

/// Build the default dock layout and return the DockState.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │ [Internals]                                 │
/// ├──────────────────────┬──────────────────────┤
/// │  Subscriptions       │  Publishers          │
/// │                      │                      │
/// └──────────────────────┴──────────────────────┘
/// ```
pub fn build_default_layout(workspace: &mut Workspace) -> DockState<PaneId> {
    match workspace.register_pane(PaneKind::Internals, "Internals") {
        Some(internals_id) => DockState::new(vec![internals_id]),
        None => DockState::new(vec![]),
    }
}
