//! Status bar panel: bottom bar showing snapshot source, counts, and error info.
//!
//! Sits below the dock workspace area.

use egui::{Color32, RichText, Ui};

use crate::frontend::player_data::PlayerData;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub player: &'a PlayerData,
    pub last_error: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Snapshot source ===
        let (status_color, source_text) = match &ctx.player.snapshot_path {
            Some(path) if ctx.player.state.is_empty() => {
                (Color32::YELLOW, format!("{} (empty)", path.display()))
            }
            Some(path) => (Color32::GREEN, path.display().to_string()),
            None => (Color32::GRAY, "No snapshot loaded".to_string()),
        };
        ui.colored_label(status_color, "●");
        ui.label(RichText::new(source_text).small());

        ui.separator();

        let state = &ctx.player.state;
        ui.label(RichText::new(format!("Topics: {}", state.topics.len())).small());
        ui.separator();
        ui.label(RichText::new(format!("Subscriptions: {}", state.subscriptions.len())).small());
        ui.separator();
        ui.label(RichText::new(format!("Publishers: {}", state.publishers.len())).small());

        if let Some(loaded_at) = ctx.player.loaded_at {
            ui.separator();
            ui.label(RichText::new(format!("Loaded {}", loaded_at.format("%H:%M:%S"))).small());
        }

        // === Error message (right-aligned) ===
        if let Some(error) = ctx.last_error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            });
        }
    });
}
