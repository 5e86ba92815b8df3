//! Floating panel toolbar: small overlay anchored to a pane's top-right corner.
//!
//! Hosts per-panel buttons without taking layout space from the pane body.

use egui::{Align2, Rect, RichText, Ui};

use crate::frontend::state::AppAction;
use crate::internals::{render_text, InternalsView};

/// Context needed to render the panel toolbar.
pub struct PanelToolbarContext<'a> {
    pub view: &'a InternalsView,
    pub can_reload: bool,
    pub help_text: &'a str,
}

/// Render the floating toolbar over `pane_rect`.
///
/// Returns actions to be applied by the app.
pub fn render_panel_toolbar(
    ui: &Ui,
    pane_rect: Rect,
    ctx: &PanelToolbarContext<'_>,
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    egui::Area::new(ui.id().with("panel_toolbar"))
        .order(egui::Order::Middle)
        .pivot(Align2::RIGHT_TOP)
        .fixed_pos(pane_rect.right_top() + egui::vec2(-6.0, 6.0))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 4.0;

                    if ui
                        .small_button("Copy")
                        .on_hover_text("Copy both lists as text")
                        .clicked()
                    {
                        actions.push(AppAction::CopyText(render_text(ctx.view)));
                    }

                    if ui
                        .add_enabled(ctx.can_reload, egui::Button::new("Reload").small())
                        .on_hover_text("Reload the player snapshot")
                        .clicked()
                    {
                        actions.push(AppAction::ReloadSnapshot);
                    }

                    ui.label(RichText::new("?").weak()).on_hover_text(ctx.help_text);
                });
            });
        });

    actions
}
