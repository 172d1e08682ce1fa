// datacheck-core/src/domain/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Where accepted uploads are stored.
    #[serde(rename = "upload-dir", default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Where rendered reports are written.
    #[serde(rename = "report-dir", default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Store every upload in its own directory so concurrent submissions
    /// of the same filename do not overwrite each other.
    #[serde(rename = "isolate-uploads", default = "default_isolate_uploads")]
    pub isolate_uploads: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            report_dir: default_report_dir(),
            isolate_uploads: default_isolate_uploads(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}
fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}
fn default_isolate_uploads() -> bool {
    true
}
