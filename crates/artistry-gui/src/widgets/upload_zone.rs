//! Upload zone widget: drop area, file picker, URL entry and preview

use artistry_core::{ImageFile, TransferOrchestrator, UploadZone};

use crate::dialogs;

/// Something the zone did this frame, for the technical log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneEvent {
    Selected(String),
    Removed,
    Failed(String),
}

pub struct ZoneResponse {
    /// Area that accepts drops
    pub rect: egui::Rect,
    pub events: Vec<ZoneEvent>,
}

/// Render one upload zone
pub fn render(
    ui: &mut egui::Ui,
    zone: &mut UploadZone,
    orchestrator: &mut TransferOrchestrator,
) -> ZoneResponse {
    let mut events = Vec::new();

    ui.label(egui::RichText::new(zone.title()).size(18.0).strong());
    ui.add_space(4.0);

    let preview = orchestrator.preview(zone.slot()).map(str::to_string);
    let rect = match preview {
        None => render_drop_area(ui, zone, orchestrator, &mut events),
        Some(uri) => render_preview(ui, zone, orchestrator, &uri, &mut events),
    };

    ZoneResponse { rect, events }
}

fn render_drop_area(
    ui: &mut egui::Ui,
    zone: &mut UploadZone,
    orchestrator: &mut TransferOrchestrator,
    events: &mut Vec<ZoneEvent>,
) -> egui::Rect {
    let stroke_color = if zone.is_dragging() {
        ui.visuals().selection.stroke.color
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .inner_margin(24.0)
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(ui.available_width(), 220.0));
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("⬆").size(32.0));
                ui.label(egui::RichText::new("Drop your image here").strong());
                ui.label(egui::RichText::new("or click to browse").weak());
                if ui.button("📂 Browse...").clicked() {
                    pick_from_disk(zone, orchestrator, events);
                }

                ui.add_space(8.0);
                ui.label(egui::RichText::new("OR").weak());
                ui.add_space(8.0);

                if !zone.is_url_form_open() {
                    if ui.button("🔗 Paste URL").clicked() {
                        zone.open_url_form();
                    }
                } else {
                    render_url_form(ui, zone, orchestrator, events);
                }
            });
        })
        .response
        .rect
}

fn render_url_form(
    ui: &mut egui::Ui,
    zone: &mut UploadZone,
    orchestrator: &mut TransferOrchestrator,
    events: &mut Vec<ZoneEvent>,
) {
    let slot = zone.slot();
    let response = ui.add(
        egui::TextEdit::singleline(zone.url_input_mut())
            .hint_text("https://example.com/image.jpg")
            .desired_width(f32::INFINITY),
    );
    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.horizontal(|ui| {
        let submit = ui.button("Use URL").clicked() || enter;
        if submit {
            let url = zone.url_input().trim().to_string();
            if zone.submit_url(&mut |selection| orchestrator.select(slot, selection)) {
                events.push(ZoneEvent::Selected(url));
            }
        }
        if ui.button("Cancel").clicked() {
            zone.cancel_url_form();
        }
    });
}

fn render_preview(
    ui: &mut egui::Ui,
    zone: &mut UploadZone,
    orchestrator: &mut TransferOrchestrator,
    uri: &str,
    events: &mut Vec<ZoneEvent>,
) -> egui::Rect {
    let slot = zone.slot();
    egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.add(
                egui::Image::from_uri(uri)
                    .max_height(256.0)
                    .max_width(ui.available_width())
                    .maintain_aspect_ratio(true)
                    .corner_radius(4.0),
            );
            if ui.button("🗑 Remove").clicked()
                && zone.remove(&mut |selection| orchestrator.select(slot, selection))
            {
                events.push(ZoneEvent::Removed);
            }
        })
        .response
        .rect
}

fn pick_from_disk(
    zone: &mut UploadZone,
    orchestrator: &mut TransferOrchestrator,
    events: &mut Vec<ZoneEvent>,
) {
    let slot = zone.slot();
    let Some(path) = dialogs::pick_image(zone.title()) else {
        return;
    };
    match ImageFile::from_path(&path) {
        Ok(file) => {
            let name = file.name.clone();
            if zone.pick_file(file, &mut |selection| orchestrator.select(slot, selection)) {
                events.push(ZoneEvent::Selected(name));
            }
        }
        Err(err) => events.push(ZoneEvent::Failed(format!(
            "Failed to read {}: {}",
            path.display(),
            err
        ))),
    }
}
