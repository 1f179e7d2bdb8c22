//! Uploaded image validation and preview
//!
//! The same rules apply on both sides of the wire: the client rejects a bad
//! file before any request is made, and the catalog endpoint re-checks what
//! it receives.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use std::path::Path;
use thiserror::Error;

/// Maximum accepted image size (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME type assumed for files with an unrecognised extension
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Rejection reasons for a selected image.
///
/// The `Display` strings are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Only JPG, PNG, and WebP images are allowed.")]
    UnsupportedType(String),
    #[error("Image must be less than 5MB.")]
    TooLarge(usize),
}

/// Accepted image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
}

impl ImageKind {
    pub const ALL: [ImageKind; 3] = [ImageKind::Jpeg, ImageKind::Png, ImageKind::Webp];

    /// Match an exact MIME type; parameters such as `; charset=` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.mime().eq_ignore_ascii_case(essence))
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }
}

/// An image picked by the user, before or after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Raw file content; cheap to clone into each request
    pub bytes: Bytes,
    /// Declared MIME type
    pub mime: String,
    /// Original file name, forwarded in the multipart part
    pub file_name: String,
}

impl UploadedImage {
    pub fn new(bytes: impl Into<Bytes>, mime: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.into(),
            file_name: file_name.into(),
        }
    }

    /// Read an image from disk, deriving the MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageKind::from_extension)
            .map(|k| k.mime())
            .unwrap_or(UNKNOWN_MIME);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(bytes, mime, file_name))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Check type first, then size.
    pub fn validate(&self) -> Result<ImageKind, UploadError> {
        let kind = ImageKind::from_mime(&self.mime)
            .ok_or_else(|| UploadError::UnsupportedType(self.mime.clone()))?;
        if self.size() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge(self.size()));
        }
        Ok(kind)
    }

    /// `data:` URL for showing the image without another round trip
    pub fn preview_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}
