use reqwest::StatusCode;
use thiserror::Error;

/// Fallback text when the backend gave nothing usable.
pub const GENERIC_FAILURE: &str = "Failed to process style transfer";

/// Ways a style transfer request can fail.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Backend { status: StatusCode, body: String },

    #[error("response is not an image (content type: {})", .content_type.as_deref().unwrap_or("none"))]
    NotAnImage {
        content_type: Option<String>,
        detail: Option<String>,
    },

    #[error("invalid backend endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl TransferError {
    /// Text shown to the user in the failure notification.
    pub fn user_message(&self) -> String {
        match self {
            TransferError::Backend { body, status } => {
                let body = body.trim();
                if body.is_empty() {
                    format!("{GENERIC_FAILURE} (HTTP {})", status.as_u16())
                } else {
                    format!("Backend error: {body}")
                }
            }
            TransferError::NotAnImage { detail, .. } => match detail {
                Some(detail) => format!("Response is not an image: {detail}"),
                None => "Response is not an image".to_string(),
            },
            TransferError::Transport(err) => format!("{GENERIC_FAILURE}: {err}"),
            TransferError::Endpoint(err) => format!("{GENERIC_FAILURE}: invalid endpoint ({err})"),
        }
    }
}
