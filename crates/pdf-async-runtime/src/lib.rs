use std::path::PathBuf;

// Re-export types from library crates
pub use pdf_images::{ConvertOptions, FileId, SelectedFile};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    /// Decode a small preview for one collection entry
    ImagesLoadThumbnail {
        id: FileId,
        file: SelectedFile,
        max_side: u32,
    },
    /// Convert a snapshot of the collection, in order
    ImagesConvert {
        files: Vec<SelectedFile>,
        options: ConvertOptions,
        output_path: PathBuf,
    },
    /// Persist the current options as JSON
    ImagesSaveConfig {
        options: ConvertOptions,
        path: PathBuf,
    },
    ImagesLoadConfig {
        path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    ThumbnailLoaded {
        id: FileId,
        width: usize,
        height: usize,
        rgba_data: Vec<u8>,
    },
    ThumbnailFailed {
        id: FileId,
        message: String,
    },
    /// `path` is `None` when there was nothing to convert
    ConvertComplete {
        path: Option<PathBuf>,
        page_count: usize,
    },
    ConvertFailed {
        message: String,
    },
    ConfigLoaded {
        options: ConvertOptions,
    },
    ConfigSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
}

/// Errors raised while talking to the worker
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Worker channel closed")]
    ChannelClosed,
}

/// Send a command, mapping a dropped receiver to [`RuntimeError`]
pub fn send_command(
    tx: &tokio::sync::mpsc::UnboundedSender<PdfCommand>,
    command: PdfCommand,
) -> Result<(), RuntimeError> {
    tx.send(command).map_err(|_| RuntimeError::ChannelClosed)
}
