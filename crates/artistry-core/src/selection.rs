//! Image selections held by the two upload slots.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Content type used when the extension gives no hint.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Extensions offered by file pickers and recognised when inferring content types.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "ico", "avif", "svg",
];

/// One of the two independent upload slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Content,
    Style,
}

impl SlotKind {
    pub const ALL: [SlotKind; 2] = [SlotKind::Content, SlotKind::Style];

    pub fn title(self) -> &'static str {
        match self {
            SlotKind::Content => "Content Image",
            SlotKind::Style => "Style Image",
        }
    }

    /// Multipart field used when the slot carries a file.
    pub fn file_field(self) -> &'static str {
        match self {
            SlotKind::Content => "content_file",
            SlotKind::Style => "style_file",
        }
    }

    /// Multipart field used when the slot carries a URL.
    pub fn url_field(self) -> &'static str {
        match self {
            SlotKind::Content => "content_url",
            SlotKind::Style => "style_url",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Content => "content",
            SlotKind::Style => "style",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image file held in memory.
///
/// The bytes are reference counted so building a request or a preview never copies them.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, inferring its content type from the extension.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(name, mime_from_path(path), bytes))
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// What an upload slot currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageSelection {
    #[default]
    None,
    File(ImageFile),
    Url(String),
}

impl ImageSelection {
    pub fn is_empty(&self) -> bool {
        matches!(self, ImageSelection::None)
    }

    pub fn file(&self) -> Option<&ImageFile> {
        match self {
            ImageSelection::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ImageSelection::Url(url) => Some(url),
            _ => None,
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            ImageSelection::None => "none".to_string(),
            ImageSelection::File(file) => format!("file {} ({}, {} bytes)", file.name, file.mime, file.len()),
            ImageSelection::Url(url) => format!("url {url}"),
        }
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Infer a content type from a path's extension.
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => FALLBACK_MIME,
    }
}
