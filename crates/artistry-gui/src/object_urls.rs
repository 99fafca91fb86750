//! Object URLs backed by egui's byte loader.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use artistry_core::ObjectUrlStore;

/// Registers blobs with an [`egui::Context`] under unique `bytes://` URIs.
///
/// The image loaders installed by `egui_extras` decode them on first display. Revoking
/// forgets both the bytes and any decoded texture.
pub struct EguiObjectUrls {
    ctx: egui::Context,
    next_id: AtomicU64,
}

impl EguiObjectUrls {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next_id: AtomicU64::new(0),
        }
    }
}

impl ObjectUrlStore for EguiObjectUrls {
    fn create(&self, name_hint: &str, bytes: Arc<[u8]>) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        // Loaders sniff the format from the extension, so keep the file name last.
        let uri = format!("bytes://artistry/{id}/{}", sanitize_name(name_hint));
        self.ctx.include_bytes(uri.clone(), bytes);
        uri
    }

    fn revoke(&self, uri: &str) {
        self.ctx.forget_image(uri);
    }
}

fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '_' { ch } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}
