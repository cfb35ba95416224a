use pdf_async_runtime::PdfUpdate;
use pdf_images::{ConvertOptions, FileId, SelectedFile};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_load_thumbnail(
    id: FileId,
    file: SelectedFile,
    max_side: u32,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match pdf_images::decode_thumbnail(&file, max_side).await {
        Ok(thumbnail) => {
            let _ = update_tx.send(PdfUpdate::ThumbnailLoaded {
                id,
                width: thumbnail.width,
                height: thumbnail.height,
                rgba_data: thumbnail.rgba,
            });
        }
        Err(e) => {
            log::warn!("No preview for {}: {}", file.name, e);
            let _ = update_tx.send(PdfUpdate::ThumbnailFailed {
                id,
                message: e.to_string(),
            });
        }
    }
}

pub async fn handle_convert(
    files: Vec<SelectedFile>,
    options: ConvertOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    log::info!("Converting {} image(s)", files.len());

    let progress_tx = update_tx.clone();
    let update = terminal_update(async move {
        let result =
            pdf_images::convert_to_file(&files, &options, &output_path, |current, total| {
                let _ = progress_tx.send(PdfUpdate::Progress {
                    operation: "Converting images".to_string(),
                    current,
                    total,
                });
            })
            .await;

        match result {
            Ok(report) => {
                let page_count = report.as_ref().map_or(0, |r| r.page_count);
                PdfUpdate::ConvertComplete {
                    path: report.map(|r| r.path),
                    page_count,
                }
            }
            Err(e) => {
                log::warn!("Conversion failed: {}", e);
                PdfUpdate::ConvertFailed {
                    message: e.to_string(),
                }
            }
        }
    })
    .await;

    let _ = update_tx.send(update);
}

/// Run `task` on its own tokio task so a panic still ends the conversion
async fn terminal_update<Fut>(task: Fut) -> PdfUpdate
where
    Fut: Future<Output = PdfUpdate> + Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(update) => update,
        Err(e) => {
            log::error!("Conversion task stopped: {}", e);
            PdfUpdate::ConvertFailed {
                message: format!("Conversion stopped unexpectedly: {e}"),
            }
        }
    }
}

pub async fn handle_save_config(
    options: ConvertOptions,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match options.save(&path).await {
        Ok(()) => {
            let _ = update_tx.send(PdfUpdate::ConfigSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to save settings: {e}"),
            });
        }
    }
}

pub async fn handle_load_config(path: PathBuf, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    let loaded = match ConvertOptions::load(&path).await {
        Ok(options) => options.validate().map(|()| options),
        Err(e) => Err(e),
    };

    match loaded {
        Ok(options) => {
            let _ = update_tx.send(PdfUpdate::ConfigLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to load settings: {e}"),
            });
        }
    }
}
