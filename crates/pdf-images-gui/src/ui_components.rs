use eframe::egui;
use pdf_images::{FileId, PreviewEntry};

/// Builder for creating drag values with automatic formatting
pub struct DragValueBuilder<'a, T> {
    value: &'a mut T,
    range: Option<std::ops::RangeInclusive<T>>,
    suffix: Option<String>,
    speed: Option<f32>,
}

impl<'a, T> DragValueBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T) -> Self {
        Self {
            value,
            range: None,
            suffix: None,
            speed: None,
        }
    }

    pub fn range(mut self, range: std::ops::RangeInclusive<T>) -> Self {
        self.range = Some(range);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut drag = egui::DragValue::new(self.value);

        if let Some(range) = self.range {
            drag = drag.range(range);
        }

        if let Some(suffix) = self.suffix {
            drag = drag.suffix(suffix);
        }

        if let Some(speed) = self.speed {
            drag = drag.speed(speed);
        }

        ui.add(drag).changed()
    }
}

/// Labeled horizontal drag value with range and suffix
pub fn labeled_drag_clamped<T>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    range: std::ops::RangeInclusive<T>,
    suffix: &str,
) -> bool
where
    T: egui::emath::Numeric,
{
    ui.horizontal(|ui| {
        ui.label(label);
        DragValueBuilder::new(value)
            .range(range)
            .suffix(suffix)
            .speed(10.0)
            .show(ui)
    })
    .inner
}

/// Enum selector using ComboBox
pub fn enum_selector<T>(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut T,
    options: &[(T, &str)],
) -> bool
where
    T: PartialEq + Clone,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);

        let current_text = options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, text)| *text)
            .unwrap_or("Custom");

        egui::ComboBox::from_id_salt(id)
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                for (option_value, option_text) in options {
                    if ui
                        .selectable_value(value, option_value.clone(), *option_text)
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
    });
    changed
}

/// Horizontal button group for enum selection
pub fn button_group<T>(ui: &mut egui::Ui, value: &mut T, options: &[(T, &str)]) -> bool
where
    T: PartialEq + Clone,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        for (option_value, option_text) in options {
            if ui
                .selectable_value(value, option_value.clone(), *option_text)
                .changed()
            {
                changed = true;
            }
        }
    });
    changed
}

/// Edit requested from an [`ImageListEditor`] row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    MoveUp(FileId),
    MoveDown(FileId),
    Remove(FileId),
}

/// Preview rows with reordering and removal, keyed by file id
pub struct ImageListEditor<'a, F> {
    entries: &'a [PreviewEntry],
    thumbnail: F,
    thumbnail_size: f32,
}

impl<'a, F> ImageListEditor<'a, F>
where
    F: FnMut(&mut egui::Ui, FileId, egui::Vec2),
{
    /// `thumbnail` paints the preview for one entry into the given size
    pub fn new(entries: &'a [PreviewEntry], thumbnail: F) -> Self {
        Self {
            entries,
            thumbnail,
            thumbnail_size: 64.0,
        }
    }

    pub fn thumbnail_size(mut self, size: f32) -> Self {
        self.thumbnail_size = size;
        self
    }

    pub fn show(mut self, ui: &mut egui::Ui) -> Option<ListAction> {
        let mut action = None;
        let last = self.entries.len().saturating_sub(1);
        let size = egui::vec2(self.thumbnail_size, self.thumbnail_size);

        for entry in self.entries {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    if ui
                        .add_enabled(entry.index > 0, egui::Button::new("▲").small())
                        .clicked()
                    {
                        action = Some(ListAction::MoveUp(entry.id));
                    }
                    if ui
                        .add_enabled(entry.index < last, egui::Button::new("▼").small())
                        .clicked()
                    {
                        action = Some(ListAction::MoveDown(entry.id));
                    }
                });

                (self.thumbnail)(ui, entry.id, size);

                ui.vertical(|ui| {
                    ui.label(format!("{}. {}", entry.index + 1, entry.name));
                    ui.weak(format!("{} · {}", format_size(entry.size), entry.mime));
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                        action = Some(ListAction::Remove(entry.id));
                    }
                });
            });
            ui.separator();
        }

        action
    }
}

/// Human readable byte count
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
