use eframe::egui;

use super::state::{ImagesState, Thumbnail};
use crate::ui_components::{ImageListEditor, ListAction};

pub fn show(ui: &mut egui::Ui, state: &mut ImagesState) {
    let preview = state.session.preview();
    if !preview.visible {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.heading("No Images");
                ui.label("Add images to begin");
            });
        });
        return;
    }

    ui.heading(format!("📑 Pages ({})", preview.entries.len()));
    ui.add_space(5.0);

    let thumbnails = &state.thumbnails;
    let action = egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ImageListEditor::new(&preview.entries, |ui, id, size| {
                match thumbnails.get(&id) {
                    Some(Thumbnail::Ready(texture)) => {
                        ui.add(egui::Image::new(texture).fit_to_exact_size(fit(texture.size_vec2(), size)));
                    }
                    Some(Thumbnail::Failed(message)) => {
                        ui.add_sized(size, egui::Label::new("⚠"))
                            .on_hover_text(message);
                    }
                    _ => {
                        ui.add_sized(size, egui::Spinner::new());
                    }
                }
            })
            .thumbnail_size(72.0)
            .show(ui)
        })
        .inner;

    // Applied after rendering; ids stay valid even if the list shifted
    match action {
        Some(ListAction::MoveUp(id)) => {
            state.session.move_up(id);
        }
        Some(ListAction::MoveDown(id)) => {
            state.session.move_down(id);
        }
        Some(ListAction::Remove(id)) => {
            if let Some(removed) = state.session.remove(id) {
                log::debug!("Removed {}", removed.name);
            }
        }
        None => {}
    }
}

/// Largest size with the texture's aspect ratio inside `bounds`
fn fit(texture: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if texture.x <= 0.0 || texture.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.x / texture.x).min(bounds.y / texture.y);
    texture * scale
}
