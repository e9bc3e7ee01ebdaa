//! File-upload metadata and acceptance limits.

use crate::DivsError;
use serde::{Deserialize, Serialize};

/// Metadata for a file the user picked. The demo never reads file contents;
/// only the metadata is validated and echoed back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

/// Acceptance limits applied before a mock upload.
#[derive(Clone, Debug)]
pub struct FileLimits {
    pub max_size: u64,
    pub allowed_types: &'static [&'static str],
}

impl FileLimits {
    /// 10 MiB, image or PDF — what the document upload form accepts.
    pub fn documents() -> Self {
        Self {
            max_size: 10 * 1024 * 1024,
            allowed_types: &["image/jpeg", "image/png", "image/webp", "application/pdf"],
        }
    }

    /// Images only, for avatars and captures.
    pub fn images() -> Self {
        Self {
            max_size: 10 * 1024 * 1024,
            allowed_types: &["image/jpeg", "image/png", "image/webp"],
        }
    }

    pub fn check(&self, file: &FileUpload) -> Result<(), DivsError> {
        if file.size > self.max_size {
            return Err(DivsError::FileRejected(format!(
                "file size must be less than {}MB",
                self.max_size / 1024 / 1024
            )));
        }
        if !self.allowed_types.is_empty() && !self.allowed_types.contains(&file.mime.as_str()) {
            return Err(DivsError::FileRejected(format!(
                "file type {} is not allowed",
                file.mime
            )));
        }
        Ok(())
    }
}
