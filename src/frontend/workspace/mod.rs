//! Workspace module for dockable pane management
//!
//! Provides the core workspace types: PaneId, PaneKind, Workspace.
//! Uses egui_dock for drag-and-drop docking, tabs, and splits.

pub mod default_layout;
pub mod tab_viewer;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::{SerializedPane, SerializedWorkspaceLayout};
use crate::error::{Result, TopicVisError};
use crate::frontend::pane_registry::{self, PaneKindInfo};
use crate::frontend::pane_trait::Pane;
use crate::internals::PANEL_TYPE as INTERNALS_PANEL_TYPE;

/// Unique identifier for a pane instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaneId(pub u64);

static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

impl PaneId {
    pub fn next() -> Self {
        Self(NEXT_PANE_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Make sure future IDs do not collide with a restored one.
    fn reserve(id: u64) {
        NEXT_PANE_ID.fetch_max(id.saturating_add(1), Ordering::SeqCst);
    }
}

/// Kind of pane (used for dispatch and menu display)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneKind {
    Internals,
}

impl PaneKind {
    /// Fixed panel type identifier used to register and persist the pane.
    pub fn panel_type(&self) -> &'static str {
        match self {
            PaneKind::Internals => INTERNALS_PANEL_TYPE,
        }
    }

    pub fn from_panel_type(panel_type: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.panel_type() == panel_type)
    }

    pub fn all() -> &'static [PaneKind] {
        &[PaneKind::Internals]
    }
}

/// Metadata entry for a pane
pub struct PaneEntry {
    pub id: PaneId,
    pub kind: PaneKind,
    pub title: String,
}

/// The workspace holds all dock state, pane data, and the pane registry.
pub struct Workspace {
    pub dock_state: egui_dock::DockState<PaneId>,
    pub pane_states: HashMap<PaneId, Box<dyn Pane>>,
    pub pane_entries: HashMap<PaneId, PaneEntry>,
    registry: HashMap<PaneKind, PaneKindInfo>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create an empty workspace with the pane registry.
    pub fn new() -> Self {
        let registry: HashMap<PaneKind, PaneKindInfo> = pane_registry::build_registry()
            .into_iter()
            .map(|info| (info.kind, info))
            .collect();

        Self {
            dock_state: egui_dock::DockState::new(vec![]),
            pane_states: HashMap::new(),
            pane_entries: HashMap::new(),
            registry,
        }
    }

    /// Create a workspace laid out with the default panes.
    pub fn with_default_layout() -> Self {
        let mut workspace = Self::new();
        workspace.dock_state = default_layout::build_default_layout(&mut workspace);
        workspace
    }

    /// Register a new pane and return its ID.
    ///
    /// Returns `None` if the kind is missing from the registry.
    pub fn register_pane(&mut self, kind: PaneKind, title: impl Into<String>) -> Option<PaneId> {
        let id = PaneId::next();
        self.insert_pane(id, kind, title.into()).then_some(id)
    }

    fn insert_pane(&mut self, id: PaneId, kind: PaneKind, title: String) -> bool {
        let Some(info) = self.registry.get(&kind) else {
            tracing::error!("{:?} is not in the pane registry", kind);
            return false;
        };

        self.pane_states.insert(id, (info.factory)());
        self.pane_entries.insert(id, PaneEntry { id, kind, title });
        true
    }

    /// Create a pane of `kind` and add it as a tab in the focused leaf.
    ///
    /// For a singleton kind that is already open, returns the open pane.
    pub fn open_new_pane(&mut self, kind: PaneKind) -> Option<PaneId> {
        let singleton = self.registry.get(&kind).is_some_and(|info| info.is_singleton);
        if singleton {
            if let Some(entry) = self.pane_entries.values().find(|e| e.kind == kind) {
                return Some(entry.id);
            }
        }

        let title = self.next_title(kind);
        let id = self.register_pane(kind, title)?;
        if self.dock_state.main_surface().is_empty() {
            self.dock_state = egui_dock::DockState::new(vec![id]);
        } else {
            self.dock_state.push_to_focused_leaf(id);
        }
        Some(id)
    }

    /// "Internals", then "Internals 2", "Internals 3", ...
    ///
    /// Numbers continue after the highest one in use, so closing a pane never
    /// leads to a duplicate title.
    fn next_title(&self, kind: PaneKind) -> String {
        let name = self.display_name(kind);
        let highest = self
            .pane_entries
            .values()
            .filter(|e| e.kind == kind)
            .filter_map(|e| title_number(name, &e.title))
            .max();
        match highest {
            None => name.to_string(),
            Some(n) => format!("{} {}", name, n.saturating_add(1)),
        }
    }

    /// Look up the display name for a pane kind from the registry.
    pub fn display_name(&self, kind: PaneKind) -> &'static str {
        self.registry
            .get(&kind)
            .map(|info| info.display_name)
            .unwrap_or("Unknown")
    }

    /// Iterate all registered pane kinds.
    pub fn registry_kinds(&self) -> impl Iterator<Item = &PaneKindInfo> {
        self.registry.values()
    }

    /// Remove a pane by ID.
    pub fn remove_pane(&mut self, id: PaneId) {
        self.pane_states.remove(&id);
        self.pane_entries.remove(&id);
    }

    /// Serialize the dock tree and pane metadata.
    pub fn to_serialized_layout(&self) -> Result<SerializedWorkspaceLayout> {
        let dock_json = serde_json::to_string(&self.dock_state)?;
        let mut panes: Vec<SerializedPane> = self
            .pane_entries
            .values()
            .map(|entry| SerializedPane {
                id: entry.id.0,
                panel_type: entry.kind.panel_type().to_string(),
                title: entry.title.clone(),
            })
            .collect();
        panes.sort_by_key(|p| p.id);

        Ok(SerializedWorkspaceLayout { dock_json, panes })
    }

    /// Rebuild a workspace from a persisted layout.
    ///
    /// Fails if the layout names a panel type this build does not know.
    pub fn from_serialized_layout(layout: &SerializedWorkspaceLayout) -> Result<Self> {
        let dock_state: egui_dock::DockState<PaneId> = serde_json::from_str(&layout.dock_json)?;
        let mut workspace = Self::new();

        for pane in &layout.panes {
            let kind = PaneKind::from_panel_type(&pane.panel_type).ok_or_else(|| {
                TopicVisError::Config(format!("Unknown panel type {:?}", pane.panel_type))
            })?;
            if pane.id == u64::MAX {
                return Err(TopicVisError::Config(format!(
                    "Pane id {} is out of range",
                    pane.id
                )));
            }
            PaneId::reserve(pane.id);
            workspace.insert_pane(PaneId(pane.id), kind, pane.title.clone());
        }

        workspace.dock_state = dock_state;
        Ok(workspace)
    }
}

/// Number in a generated pane title: 1 for the bare name, N for "name N".
fn title_number(name: &str, title: &str) -> Option<u64> {
    if title == name {
        return Some(1);
    }
    title.strip_prefix(name)?.strip_prefix(' ')?.parse().ok()
}
