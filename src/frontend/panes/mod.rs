//! Pane modules for the workspace
//!
//! Each pane provides a render function that takes its own state, SharedState, and &mut Ui.
//! Panes return Vec<AppAction> instead of mutating state directly.

pub mod internals;

pub use internals::InternalsPaneState;
