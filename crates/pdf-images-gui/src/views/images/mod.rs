mod actions_section;
mod drop_area;
mod preview_section;
mod settings_section;
mod state;

pub use state::{ImagesState, Thumbnail};

use eframe::egui;
use pdf_async_runtime::{PdfCommand, send_command};
use pdf_images::SelectedFile;
use std::collections::HashSet;
use tokio::sync::mpsc;

/// Longest edge of a preview thumbnail in pixels
const THUMBNAIL_SIDE: u32 = 128;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico", "tga", "pnm",
];

pub fn show_images(
    ui: &mut egui::Ui,
    state: &mut ImagesState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    egui::SidePanel::left("images_controls")
        .min_width(300.0)
        .show_inside(ui, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Images to PDF");
                ui.separator();

                if drop_area::show(ui, state) {
                    add_selected(state, pick_images());
                }
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                settings_section::show(ui, state);
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                actions_section::show(ui, state, command_tx);
            });
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        preview_section::show(ui, state);
    });

    sync_thumbnails(state, command_tx);
}

/// Open the multi-select picker
pub fn pick_images() -> Vec<SelectedFile> {
    let Some(paths) = rfd::FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_files()
    else {
        return Vec::new();
    };

    paths
        .into_iter()
        .filter_map(|path| match SelectedFile::from_path(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

/// Files dropped on the window, from disk or in memory
pub fn dropped_files(dropped: &[egui::DroppedFile]) -> Vec<SelectedFile> {
    dropped
        .iter()
        .filter_map(|file| {
            if let Some(path) = &file.path {
                return match SelectedFile::from_path(path) {
                    Ok(selected) => Some(selected),
                    Err(e) => {
                        log::warn!("Skipping {}: {}", path.display(), e);
                        None
                    }
                };
            }

            let bytes = file.bytes.clone()?;
            Some(SelectedFile::from_bytes(
                &file.name,
                bytes,
                Some(file.mime.as_str()),
                file.last_modified,
            ))
        })
        .collect()
}

pub fn add_selected(state: &mut ImagesState, files: Vec<SelectedFile>) {
    if let Some(outcome) = state.session.add_files(files) {
        log::debug!(
            "Added {} new image(s), {} duplicate(s)",
            outcome.added,
            outcome.duplicates
        );
    }
}

/// Request thumbnails for new entries and drop textures of removed ones
fn sync_thumbnails(state: &mut ImagesState, command_tx: &mpsc::UnboundedSender<PdfCommand>) {
    let revision = state.session.revision();
    if revision == state.synced_revision {
        return;
    }
    state.synced_revision = revision;

    let live: HashSet<_> = state.session.collection().iter().map(|f| f.id).collect();
    state.thumbnails.retain(|id, _| live.contains(id));

    for file in state.session.collection().iter() {
        if state.thumbnails.contains_key(&file.id) {
            continue;
        }
        let command = PdfCommand::ImagesLoadThumbnail {
            id: file.id,
            file: file.clone(),
            max_side: THUMBNAIL_SIDE,
        };
        match send_command(command_tx, command) {
            Ok(()) => {
                state.thumbnails.insert(file.id, Thumbnail::Pending);
            }
            Err(e) => {
                state
                    .thumbnails
                    .insert(file.id, Thumbnail::Failed(e.to_string()));
            }
        }
    }
}
