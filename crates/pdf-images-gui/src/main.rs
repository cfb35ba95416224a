#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use eframe::egui;

mod app;
mod handlers;
mod logger;
mod ui_components;
mod views;
mod worker;

/// Entries kept for the activity panel
const LOG_CAPACITY: usize = 500;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(LOG_CAPACITY);
    logger
        .clone()
        .init()
        .context("Failed to install logger")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_title("Images to PDF")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Images to PDF",
        options,
        Box::new(move |cc| Ok(Box::new(app::ImagesApp::new(cc, handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI exited with error: {e}"))
}
