//! Core library crate for the style transfer client: upload slots, previews, the transfer
//! state machine and the backend HTTP client.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;
pub mod preview;
pub mod selection;
pub mod transfer;
pub mod upload;

pub use client::StyleTransferClient;
pub use config::{
    BackendPreferences, ConfigError, ConfigLoadResult, ConfigSource, DEFAULT_ENDPOINT, FileConfig,
    ThemePreference, UiPreferences, config_directory, config_path, load_config, save_config,
};
pub use error::TransferError;
pub use notification::{Notification, NotificationKind};
pub use preview::{MemoryObjectUrls, ObjectUrl, ObjectUrlStore, Preview};
pub use selection::{ImageFile, ImageSelection, SlotKind};
pub use transfer::{
    ImageSource, ResultImage, StylizedImage, TransferBackend, TransferOrchestrator,
    TransferRequest, TransferState,
};
pub use upload::UploadZone;
