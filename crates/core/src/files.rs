//! Note image uploads.

use async_trait::async_trait;
use thiserror::Error;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Extensions accepted for note images, lowercase without the dot.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Directory under the uploads root that holds note images.
pub const NOTE_IMAGES_DIR: &str = "NoteImages";

/// An uploaded file as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name; only its extension is used.
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Reasons an upload is rejected before it is stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    #[error("No image file provided")]
    Empty,
    #[error("Invalid file type. Only JPG, JPEG, PNG, and GIF are allowed.")]
    UnsupportedType,
    #[error("File size exceeds the 5MB limit")]
    TooLarge,
}

/// Errors raised by a file store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileStoreError {
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Byte storage for uploaded files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Saves `content` at `relative_path` under the store's root, creating
    /// parent directories as needed.
    async fn save(&self, relative_path: &str, content: &[u8]) -> Result<(), FileStoreError>;
}

/// Validates an upload and returns its normalized (lowercase) extension.
pub fn validate_image(upload: &ImageUpload) -> Result<String, ImageValidationError> {
    if upload.content.is_empty() {
        return Err(ImageValidationError::Empty);
    }
    let extension = upload
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .ok_or(ImageValidationError::UnsupportedType)?;
    if upload.content.len() > MAX_IMAGE_BYTES {
        return Err(ImageValidationError::TooLarge);
    }
    Ok(extension)
}

/// Path of a stored note image relative to the uploads root.
pub fn image_relative_path(stem: &str, extension: &str) -> String {
    format!("{}/{}.{}", NOTE_IMAGES_DIR, stem, extension)
}
