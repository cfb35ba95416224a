use chrono::Utc;
use eframe::egui;
use pdf_async_runtime::{PdfCommand, PdfUpdate};
use pdf_images::{ConvertReport, Severity};
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views::{ImagesState, Thumbnail, show_images, show_log, show_notifications};

const WORKER_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct ImagesApp {
    images: ImagesState,
    logger: AppLogger,
    show_log: bool,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<PdfCommand>,
    update_rx: mpsc::UnboundedReceiver<PdfUpdate>,

    progress: Option<ProgressState>,

    _tokio_handle: tokio::runtime::Handle,
}

impl ImagesApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        let images = ImagesState::default();
        log::info!("Saving documents to {}", images.output_dir.display());

        Self {
            images,
            logger,
            show_log: false,
            command_tx,
            update_rx,
            progress: None,
            _tokio_handle: tokio_handle,
        }
    }

    fn handle_update(&mut self, ctx: &egui::Context, update: PdfUpdate) {
        let session = &mut self.images.session;

        match update {
            PdfUpdate::Progress {
                operation,
                current,
                total,
            } => {
                self.progress = Some(ProgressState {
                    operation,
                    current,
                    total,
                });
            }
            PdfUpdate::ThumbnailLoaded {
                id,
                width,
                height,
                rgba_data,
            } => {
                // The entry may have been removed while decoding
                if let Some(slot) = self.images.thumbnails.get_mut(&id) {
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);
                    let texture = ctx.load_texture(
                        format!("thumbnail_{}", id.0),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    *slot = Thumbnail::Ready(texture);
                }
            }
            PdfUpdate::ThumbnailFailed { id, message } => {
                if let Some(slot) = self.images.thumbnails.get_mut(&id) {
                    *slot = Thumbnail::Failed(message);
                }
            }
            PdfUpdate::ConvertComplete { path, page_count } => {
                self.progress = None;
                session.conversion_succeeded(path.map(|path| ConvertReport { path, page_count }));
            }
            PdfUpdate::ConvertFailed { message } => {
                self.progress = None;
                session.conversion_failed(message);
            }
            PdfUpdate::ConfigLoaded { options } => {
                self.images.options = options;
                session.notify("Settings loaded", Severity::Info);
            }
            PdfUpdate::ConfigSaved { path } => {
                session.notify(
                    format!("Settings saved to {}", path.display()),
                    Severity::Info,
                );
            }
            PdfUpdate::Error { message } => {
                self.progress = None;
                session.notify(message, Severity::Error);
            }
        }
    }

    fn handle_file_drop(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                crate::views::images::dropped_files(&i.raw.dropped_files),
            )
        });

        self.images.drag_hover = hovering;
        if !dropped.is_empty() {
            crate::views::images::add_selected(&mut self.images, dropped);
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        let notifications = self.images.session.notifications();
        let awaiting_worker = self.images.session.is_converting()
            || self
                .images
                .thumbnails
                .values()
                .any(|t| matches!(t, Thumbnail::Pending));

        if self.progress.is_some() || notifications.iter().any(|n| n.is_removing()) {
            ctx.request_repaint();
        } else if awaiting_worker {
            // Worker updates only arrive through polling
            ctx.request_repaint_after(WORKER_POLL_INTERVAL);
        } else if let Some(deadline) = notifications.next_deadline() {
            let wait = (deadline - Utc::now()).to_std().unwrap_or_default();
            ctx.request_repaint_after(wait);
        }
    }
}

impl eframe::App for ImagesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_file_drop(ctx);

        // Process all pending updates from worker
        while let Ok(update) = self.update_rx.try_recv() {
            self.handle_update(ctx, update);
        }

        let now = Utc::now();
        self.images.session.notifications_mut().tick(now);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} image(s) selected",
                    self.images.session.collection().len()
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_log, "📋 Activity");
                });
            });
        });

        if let Some(ref progress) = self.progress {
            egui::TopBottomPanel::bottom("progress").show(ctx, |ui| {
                ui.label(&progress.operation);
                ui.add(
                    egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                        .show_percentage(),
                );
            });
        }

        show_log(ctx, &self.logger, &mut self.show_log);

        egui::CentralPanel::default().show(ctx, |ui| {
            show_images(ui, &mut self.images, &self.command_tx);
        });

        show_notifications(ctx, self.images.session.notifications_mut(), now);

        self.schedule_repaint(ctx);
    }
}
