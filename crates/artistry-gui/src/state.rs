//! Application state management for the Artistry GUI

use std::collections::HashMap;
use std::sync::Arc;

use artistry_core::{
    FileConfig, ImageFile, ObjectUrlStore, SlotKind, StyleTransferClient, TransferOrchestrator,
    TransferRequest, UploadZone,
};
use tracing::warn;

/// Where an OS file drop lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// An empty zone that takes the drop
    Slot(SlotKind),
    /// The zone under the pointer already holds an image
    Occupied(SlotKind),
    /// Pointer is over neither zone and both already hold images
    NoEmptySlot,
}

impl DropTarget {
    pub fn slot(self) -> Option<SlotKind> {
        match self {
            DropTarget::Slot(slot) => Some(slot),
            _ => None,
        }
    }
}

/// Main application state (domain/persistent)
pub struct AppState {
    /// Configuration from artistry-core
    pub config: FileConfig,

    /// Slots, previews, transfer state and result
    pub orchestrator: TransferOrchestrator,

    /// Upload zone for the content image
    pub content_zone: UploadZone,

    /// Upload zone for the style image
    pub style_zone: UploadZone,

    /// Backend client, or why it could not be built
    pub client: Result<StyleTransferClient, String>,
}

impl AppState {
    /// Build state from the persisted config. Returns load warnings for the technical log.
    pub fn new(store: Arc<dyn ObjectUrlStore>) -> (Self, Vec<String>) {
        let load = artistry_core::load_config();
        for warning in &load.warnings {
            warn!("{warning}");
        }
        (Self::with_config(load.config, store), load.warnings)
    }

    pub fn with_config(config: FileConfig, store: Arc<dyn ObjectUrlStore>) -> Self {
        let client = StyleTransferClient::new(
            &config.backend.endpoint,
            config.backend.request_timeout(),
        )
        .map_err(|e| e.user_message());

        Self {
            config,
            orchestrator: TransferOrchestrator::new(store),
            content_zone: UploadZone::new(SlotKind::Content),
            style_zone: UploadZone::new(SlotKind::Style),
            client,
        }
    }

    /// Borrow a zone together with the orchestrator it reports to.
    pub fn zone_and_orchestrator(
        &mut self,
        slot: SlotKind,
    ) -> (&mut UploadZone, &mut TransferOrchestrator) {
        let zone = match slot {
            SlotKind::Content => &mut self.content_zone,
            SlotKind::Style => &mut self.style_zone,
        };
        (zone, &mut self.orchestrator)
    }

    pub fn zone_mut(&mut self, slot: SlotKind) -> &mut UploadZone {
        self.zone_and_orchestrator(slot).0
    }

    /// Route dropped files into a zone. Returns whether the selection changed.
    pub fn drop_files(&mut self, slot: SlotKind, files: Vec<ImageFile>) -> bool {
        let (zone, orchestrator) = self.zone_and_orchestrator(slot);
        zone.drop_files(files, &mut |selection| orchestrator.select(slot, selection))
    }

    /// The empty zone under the pointer, else the first empty zone when the pointer is elsewhere.
    pub fn drop_target(
        &self,
        zone_rects: &HashMap<SlotKind, egui::Rect>,
        pointer: Option<egui::Pos2>,
    ) -> DropTarget {
        let is_empty = |slot: &SlotKind| self.orchestrator.selection(*slot).is_empty();
        let under_pointer = pointer.and_then(|pos| {
            SlotKind::ALL
                .into_iter()
                .find(|slot| zone_rects.get(slot).is_some_and(|rect| rect.contains(pos)))
        });
        match under_pointer {
            Some(slot) if is_empty(&slot) => DropTarget::Slot(slot),
            Some(slot) => DropTarget::Occupied(slot),
            None => SlotKind::ALL
                .into_iter()
                .find(is_empty)
                .map_or(DropTarget::NoEmptySlot, DropTarget::Slot),
        }
    }

    /// Start a transfer if ready. Returns the client and request to run.
    pub fn begin_transfer(&mut self) -> Result<Option<(StyleTransferClient, TransferRequest)>, String> {
        let client = self.client.clone()?;
        Ok(self
            .orchestrator
            .begin_transfer()
            .map(|request| (client, request)))
    }

    /// Save configuration to disk
    pub fn save_config(&self) -> Result<(), String> {
        artistry_core::save_config(&self.config).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artistry_core::{ImageSelection, MemoryObjectUrls, TransferState};

    fn state() -> AppState {
        AppState::with_config(FileConfig::default(), Arc::new(MemoryObjectUrls::new()))
    }

    #[test]
    fn test_drop_routes_to_slot() {
        let mut state = state();
        let accepted = state.drop_files(
            SlotKind::Style,
            vec![ImageFile::new("s.png", "image/png", vec![1u8])],
        );
        assert!(accepted);
        assert!(state.orchestrator.selection(SlotKind::Content).is_empty());
        assert!(state.orchestrator.selection(SlotKind::Style).file().is_some());
    }

    #[test]
    fn test_begin_transfer_only_once() {
        let mut state = state();
        state
            .orchestrator
            .select(SlotKind::Content, ImageSelection::Url("https://example.com/c.jpg".into()));
        state
            .orchestrator
            .select(SlotKind::Style, ImageSelection::Url("https://example.com/s.jpg".into()));

        assert!(matches!(state.begin_transfer(), Ok(Some(_))));
        assert_eq!(state.orchestrator.state(), &TransferState::Processing);
        assert!(matches!(state.begin_transfer(), Ok(None)));
    }

    #[test]
    fn test_invalid_endpoint_blocks_transfer() {
        let mut config = FileConfig::default();
        config.backend.endpoint = "not a url".to_string();
        let mut state = AppState::with_config(config, Arc::new(MemoryObjectUrls::new()));
        state
            .orchestrator
            .select(SlotKind::Content, ImageSelection::Url("https://example.com/c.jpg".into()));
        state
            .orchestrator
            .select(SlotKind::Style, ImageSelection::Url("https://example.com/s.jpg".into()));

        assert!(state.begin_transfer().is_err());
        assert_eq!(state.orchestrator.state(), &TransferState::Idle);
    }

    fn rects() -> HashMap<SlotKind, egui::Rect> {
        HashMap::from([
            (
                SlotKind::Content,
                egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0)),
            ),
            (
                SlotKind::Style,
                egui::Rect::from_min_size(egui::pos2(200.0, 0.0), egui::vec2(100.0, 100.0)),
            ),
        ])
    }

    #[test]
    fn test_drop_target_under_pointer() {
        let mut state = state();
        let rects = rects();
        let over_style = Some(egui::pos2(250.0, 50.0));
        assert_eq!(state.drop_target(&rects, over_style), DropTarget::Slot(SlotKind::Style));

        state.drop_files(
            SlotKind::Style,
            vec![ImageFile::new("s.png", "image/png", vec![1u8])],
        );
        // Content is still empty, but the pointer is over the filled style zone.
        assert_eq!(
            state.drop_target(&rects, over_style),
            DropTarget::Occupied(SlotKind::Style)
        );
        assert_eq!(state.drop_target(&rects, over_style).slot(), None);
    }

    #[test]
    fn test_drop_target_outside_zones() {
        let mut state = state();
        let rects = rects();
        let outside = Some(egui::pos2(500.0, 500.0));
        assert_eq!(state.drop_target(&rects, outside), DropTarget::Slot(SlotKind::Content));
        assert_eq!(state.drop_target(&rects, None), DropTarget::Slot(SlotKind::Content));

        for slot in SlotKind::ALL {
            state.drop_files(slot, vec![ImageFile::new("x.png", "image/png", vec![1u8])]);
        }
        assert_eq!(state.drop_target(&rects, outside), DropTarget::NoEmptySlot);
    }
}
