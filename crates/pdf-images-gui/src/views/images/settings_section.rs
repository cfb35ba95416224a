use eframe::egui;
use pdf_images::{FitMode, Orientation, PaperSize};

use super::state::ImagesState;
use crate::ui_components::{button_group, enum_selector, labeled_drag_clamped};

pub fn show(ui: &mut egui::Ui, state: &mut ImagesState) {
    egui::CollapsingHeader::new("📐 Page Settings")
        .default_open(true)
        .show(ui, |ui| {
            let options = &mut state.options;

            show_paper_size_selector(ui, &mut options.paper_size);
            ui.add_space(5.0);

            ui.label("Orientation:");
            button_group(
                ui,
                &mut options.orientation,
                &[
                    (Orientation::Portrait, "Portrait"),
                    (Orientation::Landscape, "Landscape"),
                ],
            );
            ui.add_space(5.0);

            ui.label("Image fit:");
            if button_group(
                ui,
                &mut options.fit_mode,
                &[
                    (FitMode::Orientation, "By orientation"),
                    (FitMode::Contain, "Whole image"),
                ],
            ) {
                log::debug!("Fit mode set to {:?}", options.fit_mode);
            }
            ui.add_space(5.0);

            let (width, height) = options.page_dimensions_mm();
            ui.weak(format!("Page: {:.0} × {:.0} mm", width, height));
        });

    egui::CollapsingHeader::new("⚙ Advanced")
        .default_open(false)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Title:");
                ui.text_edit_singleline(&mut state.options.document_title);
            });
            labeled_drag_clamped(
                ui,
                "Start delay:",
                &mut state.options.repaint_delay_ms,
                0..=2_000,
                " ms",
            );
        });
}

fn show_paper_size_selector(ui: &mut egui::Ui, paper_size: &mut PaperSize) -> bool {
    let paper_sizes = [
        (PaperSize::A4, "A4"),
        (PaperSize::A3, "A3"),
        (PaperSize::A5, "A5"),
        (PaperSize::Letter, "Letter"),
        (PaperSize::Legal, "Legal"),
        (PaperSize::Tabloid, "Tabloid"),
    ];

    enum_selector(ui, "paper_size", "Paper size:", paper_size, &paper_sizes)
}
