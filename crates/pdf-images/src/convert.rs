//! Sequential image-to-PDF assembly
//!
//! Files are processed one at a time in collection order: the next file is
//! read only after the previous image has been handed to the writer, so page
//! order always matches input order.

use crate::decode::decode_image;
use crate::layout::{FitMode, PageLayout};
use crate::options::ConvertOptions;
use crate::types::*;
use crate::writer::{DocumentWriter, PdfWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a finished conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertReport {
    pub path: PathBuf,
    pub page_count: usize,
}

/// Append one page per file to `writer`.
///
/// `on_progress(current, total)` is called before each file is read. The
/// first failure aborts the run.
pub async fn convert<W, F>(
    files: &[SelectedFile],
    writer: &mut W,
    fit_mode: FitMode,
    mut on_progress: F,
) -> Result<usize>
where
    W: DocumentWriter,
    F: FnMut(usize, usize),
{
    let total = files.len();

    for (index, file) in files.iter().enumerate() {
        on_progress(index, total);

        let image = decode_image(file).await?;

        if index > 0 {
            writer.add_page();
        }

        let layout = PageLayout::compute_with(
            fit_mode,
            image.width,
            image.height,
            writer.page_width(),
            writer.page_height(),
        );
        log::debug!(
            "Placing {} ({:?}, {}x{}) on page {}",
            file.name,
            image.format,
            image.width,
            image.height,
            index + 1
        );
        if layout.overflows() {
            log::debug!("{} overflows the page: {:?}", file.name, layout);
        }

        writer.add_image(&image, &layout)?;
    }

    on_progress(total, total);
    Ok(total)
}

/// Convert `files` into a PDF written to `output_path`.
///
/// Returns `Ok(None)` without creating a document when `files` is empty.
pub async fn convert_to_file<F>(
    files: &[SelectedFile],
    options: &ConvertOptions,
    output_path: impl AsRef<Path>,
    on_progress: F,
) -> Result<Option<ConvertReport>>
where
    F: FnMut(usize, usize),
{
    if files.is_empty() {
        return Ok(None);
    }

    let output_path = output_path.as_ref().to_owned();

    if options.repaint_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(options.repaint_delay_ms)).await;
    }

    let mut writer = PdfWriter::new(options)?;
    let page_count = convert(files, &mut writer, options.fit_mode, on_progress).await?;

    // Serialization is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || writer.save()).await??;

    tokio::fs::write(&output_path, bytes).await?;

    log::info!(
        "Wrote {} page(s) to {}",
        page_count,
        output_path.display()
    );

    Ok(Some(ConvertReport {
        path: output_path,
        page_count,
    }))
}

/// Output location inside `dir` using the configured file name
pub fn output_path_in(dir: impl AsRef<Path>, options: &ConvertOptions) -> PathBuf {
    dir.as_ref().join(&options.output_file_name)
}
