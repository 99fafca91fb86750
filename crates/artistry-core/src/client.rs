//! HTTP client for the style transfer backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, header};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::error::TransferError;
use crate::selection::{FALLBACK_MIME, SlotKind};
use crate::transfer::{ImageSource, StylizedImage, TransferBackend, TransferRequest};

/// Client for the style transfer endpoint.
#[derive(Debug, Clone)]
pub struct StyleTransferClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl StyleTransferClient {
    /// Build a client. Without a timeout, timing is left to the transport.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, TransferError> {
        let endpoint = Url::parse(endpoint)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one request and interpret the response.
    pub async fn transfer(&self, request: TransferRequest) -> Result<StylizedImage, TransferError> {
        let form = build_form(&request)?;
        info!(endpoint = %self.endpoint, "Posting style transfer request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "image/*")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;
        debug!(%status, content_type = ?content_type, bytes = body.len(), "Backend responded");

        interpret_response(status, content_type.as_deref(), &body)
    }
}

impl TransferBackend for StyleTransferClient {
    async fn transfer(&self, request: TransferRequest) -> Result<StylizedImage, TransferError> {
        StyleTransferClient::transfer(self, request).await
    }
}

/// Build the multipart body: one part per slot, either a file part or a URL text part.
pub fn build_form(request: &TransferRequest) -> Result<Form, TransferError> {
    let mut form = Form::new();
    for slot in SlotKind::ALL {
        form = match request.source(slot) {
            ImageSource::File(file) => {
                let mime = if file.mime.trim().is_empty() {
                    FALLBACK_MIME
                } else {
                    file.mime.as_str()
                };
                let part = Part::bytes(file.bytes.to_vec())
                    .file_name(file.name.clone())
                    .mime_str(mime)?;
                form.part(slot.file_field(), part)
            }
            ImageSource::Url(url) => form.text(slot.url_field(), url.clone()),
        };
    }
    Ok(form)
}

/// Classify a backend response.
///
/// Non-2xx bodies are error text. A 2xx is only a success when its content type names an image.
pub fn interpret_response(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<StylizedImage, TransferError> {
    if !status.is_success() {
        return Err(TransferError::Backend {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    match content_type {
        Some(content_type) if content_type.to_ascii_lowercase().contains("image") => {
            Ok(StylizedImage {
                content_type: content_type.to_string(),
                bytes: Arc::from(body),
            })
        }
        other => Err(TransferError::NotAnImage {
            content_type: other.map(str::to_string),
            detail: error_detail(body),
        }),
    }
}

/// Pull `{"error": "..."}` out of a JSON body.
fn error_detail(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error.trim().to_string())
        .filter(|detail| !detail.is_empty())
}
