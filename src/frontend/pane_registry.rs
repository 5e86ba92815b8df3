//! Pane registry: data-driven pane registration.
//!
//! The registry is the single source of truth for all pane kinds:
//! panel type identifiers, display names, singleton flags, and factory
//! functions. The View menu and workspace pane creation are driven from
//! this data.

use crate::frontend::pane_trait::Pane;
use crate::frontend::panes::InternalsPaneState;
use crate::frontend::workspace::PaneKind;

/// Metadata for a pane kind, including its factory function.
pub struct PaneKindInfo {
    pub kind: PaneKind,
    /// Stable identifier used in persisted layouts
    pub panel_type: &'static str,
    pub display_name: &'static str,
    pub is_singleton: bool,
    pub factory: fn() -> Box<dyn Pane>,
}

/// Build the pane registry with all known pane kinds.
pub fn build_registry() -> Vec<PaneKindInfo> {
    vec![PaneKindInfo {
        kind: PaneKind::Internals,
        panel_type: PaneKind::Internals.panel_type(),
        display_name: "Internals",
        is_singleton: false,
        factory: || Box::new(InternalsPaneState::default()),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_registered_once() {
        let registry = build_registry();
        for kind in PaneKind::all() {
            let matching: Vec<_> = registry.iter().filter(|info| info.kind == *kind).collect();
            assert_eq!(matching.len(), 1, "{:?} must be registered exactly once", kind);
            assert_eq!(matching[0].panel_type, kind.panel_type());
        }
    }

    #[test]
    fn test_factory_builds_matching_pane() {
        for info in build_registry() {
            let pane = (info.factory)();
            assert_eq!(pane.kind(), info.kind);
        }

        let internals = build_registry()
            .into_iter()
            .find(|info| info.panel_type == "Internals")
            .unwrap();
        let pane = (internals.factory)();
        assert!(pane.as_any().downcast_ref::<InternalsPaneState>().is_some());
    }
}
