//! Toast overlay

use std::collections::VecDeque;

use artistry_core::NotificationKind;

use crate::ui_state::Toast;

/// Render toasts stacked in the bottom-right corner
pub fn render(ctx: &egui::Context, toasts: &VecDeque<Toast>) {
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in toasts {
                let notification = &toast.notification;
                let (fill, text) = match notification.kind {
                    NotificationKind::Error => {
                        (egui::Color32::from_rgb(170, 35, 35), egui::Color32::WHITE)
                    }
                    NotificationKind::Success => {
                        (ui.visuals().window_fill, ui.visuals().text_color())
                    }
                };

                egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.label(egui::RichText::new(&notification.title).strong().color(text));
                    ui.label(egui::RichText::new(&notification.description).color(text));
                });
                ui.add_space(6.0);
            }
        });
}
