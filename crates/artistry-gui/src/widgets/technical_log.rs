//! Technical log widget

use crate::ui_state::{LogLevel, UiState};

/// Render technical log
pub fn render(ui: &mut egui::Ui, ui_state: &mut UiState) {
    ui.horizontal(|ui| {
        ui.label(format!("{} entries", ui_state.technical_log.len()));

        if ui.button("Copy").clicked() {
            let text = ui_state
                .technical_log
                .iter()
                .map(|entry| format!("{} {} {}", entry.timestamp, level_name(entry.level), entry.message))
                .collect::<Vec<_>>()
                .join("\n");
            ui.ctx().copy_text(text);
        }

        if ui.button("Clear").clicked() {
            ui_state.technical_log.clear();
        }
    });

    ui.separator();

    egui::ScrollArea::vertical()
        .max_height(240.0)
        .auto_shrink([false, true])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in &ui_state.technical_log {
                ui.horizontal(|ui| {
                    ui.label(&entry.timestamp);
                    let color = match entry.level {
                        LogLevel::Info => egui::Color32::GRAY,
                        LogLevel::Warning => egui::Color32::YELLOW,
                        LogLevel::Error => egui::Color32::RED,
                    };
                    ui.colored_label(color, level_name(entry.level));
                    ui.label(&entry.message);
                });
            }
        });
}

fn level_name(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Info => "INFO",
        LogLevel::Warning => "WARN",
        LogLevel::Error => "ERROR",
    }
}
