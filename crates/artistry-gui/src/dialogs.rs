//! File dialog utilities

use std::path::PathBuf;

use artistry_core::selection::IMAGE_EXTENSIONS;

/// Pick an image for an upload slot
pub fn pick_image(title: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(format!("Select {title}"))
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

/// Choose where to save the stylized image
pub fn save_result(extension: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Stylized Image")
        .set_file_name(format!("stylized.{extension}"))
        .add_filter("Images", &[extension])
        .save_file()
}
