//! Submit button

use artistry_core::TransferOrchestrator;

/// Render the submit button. Returns true when clicked while ready.
pub fn render(ui: &mut egui::Ui, orchestrator: &TransferOrchestrator) -> bool {
    let label = if orchestrator.state().is_processing() {
        "⏳ Processing..."
    } else {
        "✨ Apply Style Transfer"
    };
    let button = egui::Button::new(egui::RichText::new(label).size(22.0))
        .fill(egui::Color32::from_rgb(120, 70, 180))
        .min_size(egui::vec2(ui.available_width(), 56.0));

    ui.add_enabled(orchestrator.is_ready(), button)
        .on_disabled_hover_text("Choose both a content image and a style image")
        .clicked()
}
