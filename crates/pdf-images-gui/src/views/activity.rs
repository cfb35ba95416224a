use eframe::egui;
use log::Level;

use crate::logger::AppLogger;

fn level_color(level: Level) -> egui::Color32 {
    match level {
        Level::Error => egui::Color32::LIGHT_RED,
        Level::Warn => egui::Color32::from_rgb(255, 183, 77),
        Level::Info => egui::Color32::GRAY,
        Level::Debug | Level::Trace => egui::Color32::DARK_GRAY,
    }
}

/// Collapsible activity panel at the bottom of the window
pub fn show_log(ctx: &egui::Context, logger: &AppLogger, open: &mut bool) {
    egui::TopBottomPanel::bottom("activity_log")
        .resizable(true)
        .default_height(140.0)
        .show_animated(ctx, *open, |ui| {
            ui.horizontal(|ui| {
                ui.strong(format!("Activity ({})", logger.len()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✖").on_hover_text("Hide").clicked() {
                        *open = false;
                    }
                    if ui.small_button("Clear").clicked() {
                        logger.clear();
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for entry in logger.get_entries() {
                        ui.horizontal(|ui| {
                            ui.monospace(entry.timestamp.format("%H:%M:%S").to_string());
                            ui.colored_label(level_color(entry.level), entry.level.as_str());
                            ui.label(&entry.message).on_hover_text(&entry.target);
                        });
                    }
                });
        });
}
