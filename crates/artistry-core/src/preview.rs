//! Display URLs derived from image selections.
//!
//! An [`ObjectUrl`] is created from in-memory bytes by an [`ObjectUrlStore`] and revoked when
//! the guard is dropped, so each creation is released exactly once.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::selection::ImageSelection;

/// Backend that turns blobs into displayable URIs.
pub trait ObjectUrlStore: Send + Sync {
    /// Register `bytes` and return a fresh URI for them.
    fn create(&self, name_hint: &str, bytes: Arc<[u8]>) -> String;

    /// Release a URI previously returned by [`ObjectUrlStore::create`].
    fn revoke(&self, uri: &str);
}

/// Owned object URL. Revoked on drop.
pub struct ObjectUrl {
    uri: String,
    store: Arc<dyn ObjectUrlStore>,
}

impl ObjectUrl {
    pub fn create(store: &Arc<dyn ObjectUrlStore>, name_hint: &str, bytes: Arc<[u8]>) -> Self {
        let uri = store.create(name_hint, bytes);
        debug!(uri = %uri, "Created object URL");
        Self {
            uri,
            store: Arc::clone(store),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        debug!(uri = %self.uri, "Revoking object URL");
        self.store.revoke(&self.uri);
    }
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectUrl").field(&self.uri).finish()
    }
}

/// Preview shown by an upload slot.
#[derive(Debug, Default)]
pub enum Preview {
    #[default]
    Absent,
    /// Derived from a file; released with the preview.
    Object(ObjectUrl),
    /// A URL selection, shown verbatim.
    Remote(String),
}

impl Preview {
    pub fn derive(selection: &ImageSelection, store: &Arc<dyn ObjectUrlStore>) -> Self {
        match selection {
            ImageSelection::None => Preview::Absent,
            ImageSelection::File(file) => {
                Preview::Object(ObjectUrl::create(store, &file.name, Arc::clone(&file.bytes)))
            }
            ImageSelection::Url(url) => Preview::Remote(url.clone()),
        }
    }

    pub fn uri(&self) -> Option<&str> {
        match self {
            Preview::Absent => None,
            Preview::Object(url) => Some(url.uri()),
            Preview::Remote(url) => Some(url),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Preview::Absent)
    }
}

/// In-process store used by the command line front-end and by tests.
#[derive(Default)]
pub struct MemoryObjectUrls {
    next_id: AtomicU64,
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    live: HashMap<String, Arc<[u8]>>,
    created: usize,
    revoked: usize,
    stray_revokes: usize,
}

impl MemoryObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes registered under `uri`, if it is still live.
    pub fn get(&self, uri: &str) -> Option<Arc<[u8]>> {
        self.lock().live.get(uri).cloned()
    }

    pub fn is_live(&self, uri: &str) -> bool {
        self.lock().live.contains_key(uri)
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    pub fn created_count(&self) -> usize {
        self.lock().created
    }

    pub fn revoked_count(&self) -> usize {
        self.lock().revoked
    }

    /// Revocations of URIs that were not live.
    pub fn stray_revoke_count(&self) -> usize {
        self.lock().stray_revokes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A poisoned map is still consistent: every mutation is a single insert or remove.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectUrlStore for MemoryObjectUrls {
    fn create(&self, name_hint: &str, bytes: Arc<[u8]>) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let uri = format!("blob:artistry/{id}/{name_hint}");
        let mut inner = self.lock();
        inner.created += 1;
        inner.live.insert(uri.clone(), bytes);
        uri
    }

    fn revoke(&self, uri: &str) {
        let mut inner = self.lock();
        if inner.live.remove(uri).is_some() {
            inner.revoked += 1;
        } else {
            inner.stray_revokes += 1;
            warn!(uri, "Revoke of unknown object URL");
        }
    }
}
