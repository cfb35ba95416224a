use chrono::{DateTime, Utc};
use eframe::egui;
use pdf_images::{NotificationStack, Severity};

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Success => egui::Color32::from_rgb(46, 125, 50),
        Severity::Error => egui::Color32::from_rgb(198, 40, 40),
        Severity::Info => egui::Color32::from_rgb(21, 101, 192),
        Severity::Warning => egui::Color32::from_rgb(239, 108, 0),
    }
}

/// Toast stack in the top-right corner, newest at the bottom
pub fn show_notifications(
    ctx: &egui::Context,
    notifications: &mut NotificationStack,
    now: DateTime<Utc>,
) {
    if notifications.is_empty() {
        return;
    }

    let mut dismissed = Vec::new();

    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 40.0])
        .order(egui::Order::Foreground)
        .interactable(true)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            for notification in notifications.iter() {
                let opacity = notification.opacity(now);
                let fill = severity_color(notification.severity).gamma_multiply(opacity);
                let text = egui::Color32::WHITE.gamma_multiply(opacity);

                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(6.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&notification.message).color(text));
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let close = egui::Button::new(
                                        egui::RichText::new("×").color(text),
                                    )
                                    .frame(false);
                                    if ui.add(close).clicked() {
                                        dismissed.push(notification.id);
                                    }
                                },
                            );
                        });
                    });
                ui.add_space(6.0);
            }
        });

    for id in dismissed {
        notifications.dismiss_at(id, now);
    }
}
