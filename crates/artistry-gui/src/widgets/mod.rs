//! UI widgets for the Artistry GUI

pub mod progress_display;
pub mod result_display;
pub mod technical_log;
pub mod toasts;
pub mod transfer_button;
pub mod upload_zone;
