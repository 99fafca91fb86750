//! Transfer status display

use artistry_core::TransferState;

/// Render the status line for the current transfer state
pub fn render(ui: &mut egui::Ui, state: &TransferState, elapsed_ms: Option<f64>) {
    match state {
        TransferState::Processing => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Processing...");
                if let Some(elapsed_ms) = elapsed_ms {
                    ui.label(format!("Elapsed: {:.1}s", elapsed_ms / 1000.0));
                }
            });
        }
        TransferState::Succeeded => {
            ui.colored_label(egui::Color32::GREEN, "✓ Style transfer completed");
        }
        TransferState::Failed { message } => {
            ui.vertical(|ui| {
                ui.colored_label(egui::Color32::RED, "✗ Style transfer failed");
                ui.label(message);
            });
        }
        TransferState::Idle => {}
    }
}
