use eframe::egui;
use pdf_images::{ConvertOptions, FileId, Session};
use std::collections::HashMap;
use std::path::PathBuf;

/// Preview texture for one collection entry
pub enum Thumbnail {
    Pending,
    Ready(egui::TextureHandle),
    Failed(String),
}

pub struct ImagesState {
    pub session: Session,
    pub options: ConvertOptions,
    pub output_dir: PathBuf,
    pub thumbnails: HashMap<FileId, Thumbnail>,
    /// Files are being dragged over the window
    pub drag_hover: bool,
    /// Session revision the thumbnail cache was last synced against
    pub synced_revision: u64,
}

impl Default for ImagesState {
    fn default() -> Self {
        Self {
            session: Session::new(),
            options: ConvertOptions::default(),
            output_dir: default_output_dir(),
            thumbnails: HashMap::new(),
            drag_hover: false,
            synced_revision: 0,
        }
    }
}

/// The user's download folder, or the working directory when there is none
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
