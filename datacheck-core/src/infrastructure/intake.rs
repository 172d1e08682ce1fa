// datacheck-core/src/infrastructure/intake.rs
//
// The upload boundary: vets an incoming file and stores it where the
// validation pipeline can find it.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::configuration::AppConfig;
use crate::domain::error::DomainError;
use crate::domain::table::{FileFormat, SUPPORTED_EXTENSIONS};
use crate::error::DataCheckError;
use crate::infrastructure::fs::atomic_write;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    /// Name the client sent, reduced to its final path component.
    pub original_name: String,
    /// Location relative to the upload directory, usable with
    /// `ValidationService::validate_stored`.
    pub stored_name: String,
    pub path: PathBuf,
    pub format: FileFormat,
}

pub struct UploadIntake {
    upload_dir: PathBuf,
    isolate: bool,
}

impl UploadIntake {
    pub fn new(upload_dir: impl Into<PathBuf>, isolate: bool) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            isolate,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.upload_dir.clone(), config.isolate_uploads)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub fn accept(&self, filename: &str, bytes: &[u8]) -> Result<StoredUpload, DataCheckError> {
        // 1. Presence
        if filename.trim().is_empty() {
            return Err(DomainError::RejectedUpload("No file selected".into()).into());
        }

        // 2. Keep only the final component of whatever path the client sent
        let original_name = Path::new(filename.trim())
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| DataCheckError::UnsafePath(filename.to_string()))?;

        // 3. Extension allow-list
        let format = Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| FileFormat::from_extension(e).ok())
            .ok_or_else(|| {
                DomainError::RejectedUpload(format!(
                    "Invalid file type. Allowed: {}",
                    SUPPORTED_EXTENSIONS.join(", ")
                ))
            })?;

        if bytes.is_empty() {
            return Err(DomainError::RejectedUpload("Uploaded file is empty".into()).into());
        }

        // 4. Storage
        fs::create_dir_all(&self.upload_dir)?;
        let (dir, stored_name) = if self.isolate {
            let dir = tempfile::Builder::new()
                .prefix("upload-")
                .tempdir_in(&self.upload_dir)?
                .keep();
            let sub = dir
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    DataCheckError::InternalError("Unnamed upload directory".into())
                })?;
            (dir, format!("{}/{}", sub, original_name))
        } else {
            (self.upload_dir.clone(), original_name.clone())
        };

        let path = dir.join(&original_name);
        atomic_write(&path, bytes)?;
        info!(path = ?path, "Upload stored");

        Ok(StoredUpload {
            original_name,
            stored_name,
            path,
            format,
        })
    }
}
