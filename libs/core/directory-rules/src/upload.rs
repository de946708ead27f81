//! Validation contract for logo, image and brochure uploads.
//!
//! Only the metadata is checked here; storing the bytes is the job of
//! whatever blob store sits behind the API.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const DEFAULT_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/svg+xml",
    "application/pdf",
];

const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "svg", "pdf"];

/// Metadata of a file the client intends to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadDescriptor {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("file is empty")]
    Empty,

    #[error("file is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("content type '{0}' is not accepted")]
    UnsupportedContentType(String),

    #[error("extension '{0}' is not accepted")]
    UnsupportedExtension(String),

    #[error("file name '{0}' is not acceptable")]
    InvalidFileName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::with_max_bytes(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl UploadPolicy {
    /// Default image/PDF allow-lists with a custom size limit.
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            allowed_content_types: DEFAULT_CONTENT_TYPES.iter().map(|s| s.to_string()).collect(),
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Checks name, size, media type and extension, in that order.
    pub fn validate(&self, upload: &UploadDescriptor) -> Result<(), UploadError> {
        let name = upload.file_name.trim();
        if name.is_empty()
            || name.contains(['/', '\\'])
            || name.contains("..")
            || name.chars().any(char::is_control)
        {
            return Err(UploadError::InvalidFileName(upload.file_name.clone()));
        }

        if upload.size_bytes == 0 {
            return Err(UploadError::Empty);
        }
        if upload.size_bytes > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: upload.size_bytes,
                max: self.max_bytes,
            });
        }

        // Parameters such as "; charset=utf-8" do not affect the media type.
        let media_type = upload
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !self.allowed_content_types.iter().any(|t| *t == media_type) {
            return Err(UploadError::UnsupportedContentType(upload.content_type.clone()));
        }

        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !self.allowed_extensions.iter().any(|e| *e == extension) {
            return Err(UploadError::UnsupportedExtension(extension));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: &str, size: u64) -> UploadDescriptor {
        UploadDescriptor {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            size_bytes: size,
        }
    }

    #[test]
    fn test_accepts_logo_and_brochure() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.validate(&upload("logo.PNG", "image/png", 20_000)), Ok(()));
        assert_eq!(
            policy.validate(&upload("brochure.pdf", "application/pdf; charset=binary", 1_000_000)),
            Ok(())
        );
    }

    #[test]
    fn test_rejects_size_outside_limits() {
        let policy = UploadPolicy::with_max_bytes(1024);
        assert_eq!(policy.validate(&upload("a.png", "image/png", 0)), Err(UploadError::Empty));
        assert_eq!(
            policy.validate(&upload("a.png", "image/png", 1025)),
            Err(UploadError::TooLarge { size: 1025, max: 1024 })
        );
        assert_eq!(policy.validate(&upload("a.png", "image/png", 1024)), Ok(()));
    }

    #[test]
    fn test_rejects_unlisted_types() {
        let policy = UploadPolicy::default();
        assert_eq!(
            policy.validate(&upload("run.exe", "application/octet-stream", 10)),
            Err(UploadError::UnsupportedContentType("application/octet-stream".into()))
        );
        assert_eq!(
            policy.validate(&upload("logo.gif", "image/png", 10)),
            Err(UploadError::UnsupportedExtension("gif".into()))
        );
        assert_eq!(
            policy.validate(&upload("logo", "image/png", 10)),
            Err(UploadError::UnsupportedExtension(String::new()))
        );
    }

    #[test]
    fn test_rejects_path_like_names() {
        let policy = UploadPolicy::default();
        for name in ["../etc/passwd.png", "dir/logo.png", "  ", "a\\b.png"] {
            assert!(matches!(
                policy.validate(&upload(name, "image/png", 10)),
                Err(UploadError::InvalidFileName(_))
            ));
        }
    }
}
