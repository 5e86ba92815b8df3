//! Internals pane - subscriptions and publishers side by side
//!
//! Shows the player's subscriptions and publishers grouped by who requested
//! or advertised them. Useful for debugging and for QA to check topic
//! dependencies.

use egui::{RichText, Ui};

use crate::frontend::pane_trait::Pane;
use crate::frontend::player_data::PlayerData;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::toolbar::{render_panel_toolbar, PanelToolbarContext};
use crate::frontend::workspace::PaneKind;
use crate::internals::view::NO_DATA_PLACEHOLDER;
use crate::internals::{build_view, InternalsView, SectionBody, SectionView};

const HELP_TEXT: &str = "Player internal state: active subscriptions and publishers, \
grouped by the panel or node that requested them.";

/// State for the Internals pane
#[derive(Default)]
pub struct InternalsPaneState {
    /// Last built view and the snapshot generation it was built from
    cached: Option<(u64, InternalsView)>,
}

impl InternalsPaneState {
    /// View for the current snapshot, rebuilt only when the generation changes.
    pub fn view_for(&mut self, player: &PlayerData) -> &InternalsView {
        if self.cached.as_ref().map(|(generation, _)| *generation) != Some(player.generation) {
            self.cached = None;
        }
        let (_, view) = self
            .cached
            .get_or_insert_with(|| (player.generation, build_view(&player.state)));
        view
    }
}

/// Render the Internals pane
pub fn render(
    state: &mut InternalsPaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let pane_rect = ui.max_rect();
    let view = state.view_for(shared.player);

    ui.columns(2, |columns| {
        render_section(&mut columns[0], &view.subscriptions);
        render_section(&mut columns[1], &view.publishers);
    });

    render_panel_toolbar(
        ui,
        pane_rect,
        &PanelToolbarContext {
            view,
            can_reload: shared.player.has_snapshot(),
            help_text: HELP_TEXT,
        },
    )
}

fn render_section(ui: &mut Ui, section: &SectionView) {
    ui.heading(section.title);
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .id_salt(section.title)
        .auto_shrink([false, false])
        .show(ui, |ui| match &section.body {
            SectionBody::Empty => {
                ui.label(NO_DATA_PLACEHOLDER);
            }
            SectionBody::Groups(groups) => {
                for group in groups {
                    ui.label(format!("{}:", group.label));
                    ui.indent(&group.label, |ui| {
                        for item in &group.items {
                            ui.label(RichText::new(item.text()).monospace().small());
                        }
                    });
                    ui.add_space(4.0);
                }
            }
        });
}

impl Pane for InternalsPaneState {
    fn kind(&self) -> PaneKind { PaneKind::Internals }

    fn render(&mut self, shared: &mut SharedState, ui: &mut Ui) -> Vec<AppAction> {
        render(self, shared, ui)
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
}
