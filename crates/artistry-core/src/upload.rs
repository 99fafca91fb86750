//! Upload zone state for a single image slot.
//!
//! The zone never keeps the chosen image itself. Every accepted change goes out through the
//! `on_select` callback, which is the only channel to the owner of the slot.

use tracing::{debug, info};

use crate::selection::{ImageFile, ImageSelection, SlotKind};

/// Local, unshared UI state of one upload zone.
#[derive(Debug, Clone)]
pub struct UploadZone {
    slot: SlotKind,
    dragging: bool,
    url_form_open: bool,
    url_input: String,
}

impl UploadZone {
    pub fn new(slot: SlotKind) -> Self {
        Self {
            slot,
            dragging: false,
            url_form_open: false,
            url_input: String::new(),
        }
    }

    pub fn slot(&self) -> SlotKind {
        self.slot
    }

    pub fn title(&self) -> &'static str {
        self.slot.title()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_url_form_open(&self) -> bool {
        self.url_form_open
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    /// Text buffer bound to the URL entry field.
    pub fn url_input_mut(&mut self) -> &mut String {
        &mut self.url_input
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Handle dropped files. Only the first one is considered, and only if it is an image.
    pub fn drop_files<I>(&mut self, files: I, on_select: &mut dyn FnMut(ImageSelection)) -> bool
    where
        I: IntoIterator<Item = ImageFile>,
    {
        self.dragging = false;
        let Some(file) = files.into_iter().next() else {
            return false;
        };
        if !file.is_image() {
            debug!(slot = %self.slot, name = %file.name, mime = %file.mime, "Ignoring non-image drop");
            return false;
        }
        self.emit(ImageSelection::File(file), on_select);
        true
    }

    /// Handle a file chosen through a picker. The picker's filter is the only type check.
    pub fn pick_file(&mut self, file: ImageFile, on_select: &mut dyn FnMut(ImageSelection)) -> bool {
        self.emit(ImageSelection::File(file), on_select);
        true
    }

    pub fn open_url_form(&mut self) {
        self.url_form_open = true;
    }

    pub fn cancel_url_form(&mut self) {
        self.url_form_open = false;
        self.url_input.clear();
    }

    /// Submit the URL buffer. Blank input leaves everything as it was.
    pub fn submit_url(&mut self, on_select: &mut dyn FnMut(ImageSelection)) -> bool {
        let trimmed = self.url_input.trim();
        if trimmed.is_empty() {
            return false;
        }
        let url = trimmed.to_string();
        self.emit(ImageSelection::Url(url), on_select);
        true
    }

    pub fn remove(&mut self, on_select: &mut dyn FnMut(ImageSelection)) -> bool {
        self.emit(ImageSelection::None, on_select);
        true
    }

    fn emit(&mut self, selection: ImageSelection, on_select: &mut dyn FnMut(ImageSelection)) {
        info!(slot = %self.slot, selection = %selection.describe(), "Selection changed");
        on_select(selection);
        self.reset();
    }

    fn reset(&mut self) {
        self.dragging = false;
        self.url_form_open = false;
        self.url_input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", vec![0x89u8, b'P', b'N', b'G'])
    }

    #[test]
    fn test_drop_image_emits_once_and_resets() {
        let mut zone = UploadZone::new(SlotKind::Content);
        let mut seen = Vec::new();
        zone.drag_over();
        zone.open_url_form();
        zone.url_input_mut().push_str("half typed");

        assert!(zone.drop_files(vec![png("a.png"), png("b.png")], &mut |s| seen.push(s)));

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].file().map(|f| f.name.as_str()), Some("a.png"));
        assert!(!zone.is_dragging());
        assert!(!zone.is_url_form_open());
        assert!(zone.url_input().is_empty());
    }

    #[test]
    fn test_drop_non_image_is_ignored() {
        let mut zone = UploadZone::new(SlotKind::Style);
        let mut calls = 0;
        zone.drag_over();

        let text = ImageFile::new("notes.txt", "text/plain", vec![b'h', b'i']);
        assert!(!zone.drop_files(vec![text], &mut |_| calls += 1));

        assert_eq!(calls, 0);
        assert!(!zone.is_dragging());
    }

    #[test]
    fn test_drop_nothing_is_ignored() {
        let mut zone = UploadZone::new(SlotKind::Style);
        let mut calls = 0;
        assert!(!zone.drop_files(Vec::new(), &mut |_| calls += 1));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_pick_file_accepts_any_type() {
        let mut zone = UploadZone::new(SlotKind::Content);
        let mut seen = Vec::new();
        let odd = ImageFile::new("scan.raw", "application/octet-stream", vec![1u8]);

        assert!(zone.pick_file(odd, &mut |s| seen.push(s)));
        assert_eq!(seen.len(), 1);
        assert!(seen[0].file().is_some());
    }

    #[test]
    fn test_submit_url_trims() {
        let mut zone = UploadZone::new(SlotKind::Content);
        let mut seen = Vec::new();
        zone.open_url_form();
        zone.url_input_mut().push_str("  https://example.com/cat.jpg \n");

        assert!(zone.submit_url(&mut |s| seen.push(s)));
        assert_eq!(seen, vec![ImageSelection::Url("https://example.com/cat.jpg".to_string())]);
        assert!(!zone.is_url_form_open());
        assert!(zone.url_input().is_empty());
    }

    #[test]
    fn test_submit_blank_url_is_noop() {
        let mut zone = UploadZone::new(SlotKind::Content);
        let mut calls = 0;
        zone.open_url_form();
        zone.url_input_mut().push_str("   \t ");

        assert!(!zone.submit_url(&mut |_| calls += 1));
        assert_eq!(calls, 0);
        assert!(zone.is_url_form_open());
        assert_eq!(zone.url_input(), "   \t ");
    }

    #[test]
    fn test_cancel_url_form_clears_input() {
        let mut zone = UploadZone::new(SlotKind::Style);
        zone.open_url_form();
        zone.url_input_mut().push_str("https://example.com");
        zone.cancel_url_form();
        assert!(!zone.is_url_form_open());
        assert!(zone.url_input().is_empty());
    }

    #[test]
    fn test_remove_emits_none() {
        let mut zone = UploadZone::new(SlotKind::Style);
        let mut seen = Vec::new();
        assert!(zone.remove(&mut |s| seen.push(s)));
        assert_eq!(seen, vec![ImageSelection::None]);
    }
}
