//! Conversion of files dropped onto the window.

use std::io;
use std::path::Path;

use artistry_core::ImageFile;
use artistry_core::selection::mime_from_path;

/// Turn an egui dropped file into an in-memory image file.
///
/// The reported MIME type wins when present; otherwise it is inferred from the name.
pub fn image_file_from_drop(file: &egui::DroppedFile) -> io::Result<ImageFile> {
    let reported_mime = file.mime.trim();

    if let Some(bytes) = &file.bytes {
        let name = if file.name.is_empty() {
            file.path
                .as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "dropped_image".to_string())
        } else {
            file.name.clone()
        };
        let mime = if reported_mime.is_empty() {
            mime_from_path(Path::new(&name)).to_string()
        } else {
            reported_mime.to_string()
        };
        return Ok(ImageFile::new(name, mime, bytes.clone()));
    }

    if let Some(path) = &file.path {
        let mut image = ImageFile::from_path(path)?;
        if !reported_mime.is_empty() {
            image.mime = reported_mime.to_string();
        }
        return Ok(image);
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "dropped file carries neither bytes nor a path",
    ))
}

/// Convert the first dropped file only. Later files are never considered, even when
/// the first one cannot be read.
pub fn first_dropped_image(files: &[egui::DroppedFile]) -> Option<io::Result<ImageFile>> {
    files.first().map(image_file_from_drop)
}
