//! Artistry GUI module using eframe/egui

pub mod app;
pub mod async_bridge;
pub mod dialogs;
pub mod file_drop;
pub mod object_urls;
pub mod state;
pub mod ui_state;
pub mod widgets;

/// Main entry point for the GUI
pub fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_resizable(true)
            .with_drag_and_drop(true)
            .with_title("Artistic Style Transfer"),
        ..Default::default()
    };

    eframe::run_native(
        "Artistic Style Transfer",
        native_options,
        Box::new(|cc| Ok(Box::new(app::ArtistryApp::new(cc)))),
    )
    .map_err(|e| format!("{:?}", e))
    .map_err(|e| Box::new(std::io::Error::other(e)) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(())
}
