use eframe::egui;
use pdf_async_runtime::{PdfCommand, send_command};
use tokio::sync::mpsc;

use super::state::ImagesState;

pub fn show(
    ui: &mut egui::Ui,
    state: &mut ImagesState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    egui::CollapsingHeader::new("💾 Output")
        .default_open(true)
        .show(ui, |ui| {
            show_output_folder(ui, state);
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                show_config_buttons(ui, state, command_tx);
            });
        });

    ui.add_space(10.0);

    let controls = state.session.controls();
    ui.vertical(|ui| {
        if ui.button("➕ Add Images").clicked() {
            super::add_selected(state, super::pick_images());
        }

        ui.add_space(5.0);

        if ui
            .add_enabled(
                controls.convert_enabled,
                egui::Button::new(format!("📄 {}", controls.convert_label)),
            )
            .clicked()
        {
            start_conversion(state, command_tx);
        }

        ui.add_space(5.0);

        if ui
            .add_enabled(controls.clear_enabled, egui::Button::new("🗑 Clear All"))
            .clicked()
        {
            state.session.clear();
        }
    });
}

fn show_output_folder(ui: &mut egui::Ui, state: &mut ImagesState) {
    ui.label("Save to folder:");
    ui.horizontal(|ui| {
        ui.monospace(state.output_dir.display().to_string());
        if ui.small_button("📁 Change...").clicked() {
            if let Some(dir) = rfd::FileDialog::new()
                .set_directory(&state.output_dir)
                .pick_folder()
            {
                log::info!("Output folder set to {}", dir.display());
                state.output_dir = dir;
            }
        }
    });
    ui.weak(format!("File name: {}", state.options.output_file_name));
}

fn show_config_buttons(
    ui: &mut egui::Ui,
    state: &ImagesState,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    if ui.button("Save Settings").clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("img2pdf.json")
            .save_file()
        {
            let _ = send_command(
                command_tx,
                PdfCommand::ImagesSaveConfig {
                    options: state.options.clone(),
                    path,
                },
            );
        }
    }

    if ui.button("Load Settings").clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let _ = send_command(command_tx, PdfCommand::ImagesLoadConfig { path });
        }
    }
}

fn start_conversion(state: &mut ImagesState, command_tx: &mpsc::UnboundedSender<PdfCommand>) {
    if let Err(e) = state.options.validate() {
        state.session.conversion_failed(e);
        return;
    }

    let Some(files) = state.session.start_conversion() else {
        return;
    };

    let output_path = pdf_images::output_path_in(&state.output_dir, &state.options);
    log::info!(
        "Queued conversion of {} image(s) to {}",
        files.len(),
        output_path.display()
    );

    if let Err(e) = send_command(
        command_tx,
        PdfCommand::ImagesConvert {
            files,
            options: state.options.clone(),
            output_path,
        },
    ) {
        state.session.conversion_failed(e);
    }
}
