//! The Internals panel: subscriptions and publishers grouped by origin.
//!
//! Displays the player's internal state for debugging and for QA to view
//! topic dependencies.
//!
//! # Submodules
//!
//! - [`grouping`] - Origin labels, grouping and ordering, original-topic annotations
//! - [`view`] - Render-agnostic view tree built from a [`PlayerState`](crate::types::PlayerState)
//! - [`text`] - Plain-text rendering of the view tree
//!
//! The egui rendering lives in `frontend::panes::internals`.

pub mod grouping;
pub mod text;
pub mod view;

pub use grouping::{
    annotate_original_topic, classify_publisher_origin, classify_subscription_origin,
    group_and_sort, group_publishers, group_subscriptions, OriginGroup, OriginalTopicIndex,
    UNKNOWN_ORIGIN,
};
pub use text::render_text;
pub use view::{build_view, GroupView, InternalsView, ItemLine, SectionBody, SectionView};

/// Panel type identifier the host uses to register and persist this panel.
pub const PANEL_TYPE: &str = "Internals";
