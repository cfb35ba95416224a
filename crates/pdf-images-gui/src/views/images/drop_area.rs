use eframe::egui;

use super::state::ImagesState;

/// Returns true when the area was clicked
pub fn show(ui: &mut egui::Ui, state: &ImagesState) -> bool {
    let visuals = ui.visuals();
    let (stroke, fill) = if state.drag_hover {
        (
            egui::Stroke::new(2.0, visuals.selection.stroke.color),
            visuals.selection.bg_fill.gamma_multiply(0.25),
        )
    } else {
        (
            egui::Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
            visuals.faint_bg_color,
        )
    };

    let response = egui::Frame::group(ui.style())
        .stroke(stroke)
        .fill(fill)
        .inner_margin(24.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.heading("🖼 Drop images here");
                ui.label("or click to browse");
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    response.clicked()
}
