//! Stylized result display

use artistry_core::ResultImage;

/// Render the returned image. Returns true when "Save Image..." was clicked.
pub fn render(ui: &mut egui::Ui, result: &ResultImage) -> bool {
    ui.vertical_centered(|ui| {
        ui.heading("Your Masterpiece");
        ui.label(egui::RichText::new("The fusion of content and style").weak());
    });

    ui.add_space(8.0);

    ui.add(
        egui::Image::from_uri(result.uri())
            .max_width(ui.available_width())
            .maintain_aspect_ratio(true)
            .corner_radius(8.0),
    );

    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label(format!(
            "{} · {:.1} KiB",
            result.image.content_type,
            result.image.bytes.len() as f64 / 1024.0
        ));
        ui.button("💾 Save Image...").clicked()
    })
    .inner
}
