//! Transfer orchestration: the two upload slots, readiness, and the request lifecycle.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::TransferError;
use crate::notification::Notification;
use crate::preview::{ObjectUrl, ObjectUrlStore, Preview};
use crate::selection::{ImageFile, ImageSelection, SlotKind};

/// Lifecycle of the single style transfer request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransferState {
    #[default]
    Idle,
    Processing,
    Succeeded,
    Failed { message: String },
}

impl TransferState {
    pub fn is_processing(&self) -> bool {
        matches!(self, TransferState::Processing)
    }
}

/// One image as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(ImageFile),
    Url(String),
}

impl ImageSource {
    /// Build from a selection. A file wins over a URL; an empty selection yields nothing.
    pub fn from_selection(selection: &ImageSelection) -> Option<Self> {
        match selection {
            ImageSelection::None => None,
            ImageSelection::File(file) => Some(ImageSource::File(file.clone())),
            ImageSelection::Url(url) => Some(ImageSource::Url(url.clone())),
        }
    }
}

/// Everything needed for one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub content: ImageSource,
    pub style: ImageSource,
}

impl TransferRequest {
    pub fn source(&self, slot: SlotKind) -> &ImageSource {
        match slot {
            SlotKind::Content => &self.content,
            SlotKind::Style => &self.style,
        }
    }
}

/// Image returned by the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct StylizedImage {
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl StylizedImage {
    /// File extension matching the content type, for saving.
    pub fn extension(&self) -> &'static str {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => "img",
        }
    }
}

impl std::fmt::Debug for StylizedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StylizedImage")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Network seam: performs exactly one style transfer call per invocation.
pub trait TransferBackend {
    fn transfer(
        &self,
        request: TransferRequest,
    ) -> impl Future<Output = Result<StylizedImage, TransferError>> + Send;
}

/// Result of a successful transfer, with its display URL.
#[derive(Debug)]
pub struct ResultImage {
    pub image: StylizedImage,
    pub preview: ObjectUrl,
}

impl ResultImage {
    pub fn uri(&self) -> &str {
        self.preview.uri()
    }
}

#[derive(Debug, Default)]
struct Slot {
    selection: ImageSelection,
    preview: Preview,
}

/// Owns both upload slots, their previews, the transfer state and the result.
pub struct TransferOrchestrator {
    store: Arc<dyn ObjectUrlStore>,
    content: Slot,
    style: Slot,
    state: TransferState,
    result: Option<ResultImage>,
    started_at: Option<Instant>,
}

impl TransferOrchestrator {
    pub fn new(store: Arc<dyn ObjectUrlStore>) -> Self {
        Self {
            store,
            content: Slot::default(),
            style: Slot::default(),
            state: TransferState::Idle,
            result: None,
            started_at: None,
        }
    }

    /// Replace a slot's selection. The previous preview is released here.
    pub fn select(&mut self, slot: SlotKind, selection: ImageSelection) {
        let preview = Preview::derive(&selection, &self.store);
        let target = self.slot_mut(slot);
        target.selection = selection;
        target.preview = preview;
    }

    pub fn selection(&self, slot: SlotKind) -> &ImageSelection {
        &self.slot(slot).selection
    }

    pub fn preview(&self, slot: SlotKind) -> Option<&str> {
        self.slot(slot).preview.uri()
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    pub fn result(&self) -> Option<&ResultImage> {
        self.result.as_ref()
    }

    /// Milliseconds since the in-flight request was started.
    pub fn elapsed_ms(&self) -> Option<f64> {
        match self.state {
            TransferState::Processing => self
                .started_at
                .map(|started| started.elapsed().as_secs_f64() * 1000.0),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.content.selection.is_empty()
            && !self.style.selection.is_empty()
            && !self.state.is_processing()
    }

    /// Start an attempt. Returns the request to send, or `None` when not ready.
    pub fn begin_transfer(&mut self) -> Option<TransferRequest> {
        if !self.is_ready() {
            return None;
        }
        let content = ImageSource::from_selection(&self.content.selection)?;
        let style = ImageSource::from_selection(&self.style.selection)?;

        self.result = None;
        self.state = TransferState::Processing;
        self.started_at = Some(Instant::now());
        info!("Style transfer started");

        Some(TransferRequest { content, style })
    }

    /// Record the outcome of the in-flight request.
    pub fn finish_transfer(
        &mut self,
        outcome: Result<StylizedImage, TransferError>,
    ) -> Option<Notification> {
        if !self.state.is_processing() {
            warn!("Ignoring transfer outcome while no request is in flight");
            return None;
        }
        let elapsed_ms = self.elapsed_ms().unwrap_or_default();
        self.started_at = None;

        match outcome {
            Ok(image) => {
                info!(
                    elapsed_ms,
                    content_type = %image.content_type,
                    bytes = image.bytes.len(),
                    "Style transfer completed"
                );
                let name = format!("stylized.{}", image.extension());
                let preview = ObjectUrl::create(&self.store, &name, Arc::clone(&image.bytes));
                self.result = Some(ResultImage { image, preview });
                self.state = TransferState::Succeeded;
                Some(Notification::transfer_succeeded())
            }
            Err(err) => {
                warn!(elapsed_ms, error = %err, "Style transfer failed");
                let message = err.user_message();
                self.state = TransferState::Failed {
                    message: message.clone(),
                };
                Some(Notification::transfer_failed(message))
            }
        }
    }

    /// Begin, call the backend once, and finish. Does nothing when not ready.
    pub async fn run_transfer<B: TransferBackend>(&mut self, backend: &B) -> Option<Notification> {
        let request = self.begin_transfer()?;
        let outcome = backend.transfer(request).await;
        self.finish_transfer(outcome)
    }

    fn slot(&self, slot: SlotKind) -> &Slot {
        match slot {
            SlotKind::Content => &self.content,
            SlotKind::Style => &self.style,
        }
    }

    fn slot_mut(&mut self, slot: SlotKind) -> &mut Slot {
        match slot {
            SlotKind::Content => &mut self.content,
            SlotKind::Style => &mut self.style,
        }
    }
}
