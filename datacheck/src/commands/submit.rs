// datacheck/src/commands/submit.rs
//
// USE CASE: Upload a local file through the intake, then validate it.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

use datacheck_core::DataCheckError;
use datacheck_core::domain::DomainError;
use datacheck_core::infrastructure::UploadIntake;

use super::{build_service, deliver};

pub fn execute(config: Option<&Path>, file: &Path, stdout: bool) -> anyhow::Result<()> {
    let service = build_service(config)?;
    info!(file = ?file, "Submitting file");
    let intake = UploadIntake::from_config(service.config());

    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = read_upload(file, &filename)
        .and_then(|bytes| intake.accept(&filename, &bytes))
        .and_then(|stored| {
            if !stdout {
                println!("📥 Stored upload at {}", stored.path.display());
            }
            service.validate_path(&stored.path)
        });

    deliver(&service, result, stdout)
}

fn read_upload(file: &Path, filename: &str) -> Result<Vec<u8>, DataCheckError> {
    fs::read(file).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DomainError::MissingInput(filename.to_string()).into(),
        _ => DataCheckError::from(e),
    })
}
