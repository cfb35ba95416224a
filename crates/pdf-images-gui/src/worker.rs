use pdf_async_runtime::{PdfCommand, PdfUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes commands in arrival order
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(cmd: PdfCommand, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match cmd {
        PdfCommand::ImagesLoadThumbnail { id, file, max_side } => {
            handlers::images::handle_load_thumbnail(id, file, max_side, update_tx).await;
        }
        PdfCommand::ImagesConvert {
            files,
            options,
            output_path,
        } => {
            handlers::images::handle_convert(files, options, output_path, update_tx).await;
        }
        PdfCommand::ImagesSaveConfig { options, path } => {
            handlers::images::handle_save_config(options, path, update_tx).await;
        }
        PdfCommand::ImagesLoadConfig { path } => {
            handlers::images::handle_load_config(path, update_tx).await;
        }
    }
}
