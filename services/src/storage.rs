//! Mock file-storage service.

use crate::ServiceError;
use divs_types::{FileLimits, FileUpload, SimulationParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the mock upload hands back. The URL points nowhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredFile {
    pub url: String,
    pub file_name: String,
    pub size: u64,
    pub mime: String,
}

/// Simulated blob storage.
pub struct StorageService {
    params: SimulationParams,
}

impl StorageService {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    /// Validate and "upload" a file.
    pub async fn upload_file(
        &self,
        file: &FileUpload,
        path: Option<&str>,
    ) -> Result<StoredFile, ServiceError> {
        FileLimits::documents().check(file)?;
        tracing::debug!(file = %file.name, "uploading file");
        tokio::time::sleep(Duration::from_millis(self.params.upload_file_delay_ms)).await;

        let key = path.unwrap_or(&file.name);
        Ok(StoredFile {
            url: format!("https://storage.example.com/{key}"),
            file_name: file.name.clone(),
            size: file.size,
            mime: file.mime.clone(),
        })
    }

    /// Deleting always "succeeds".
    pub fn delete_file(&self, url: &str) -> bool {
        tracing::debug!(url, "deleting file");
        true
    }
}
