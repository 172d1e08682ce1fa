// datacheck-core/src/application/validation.rs

use chrono::Local;
use miette::Diagnostic;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

// Imports Hexagonaux
use crate::application::ports::TemplateEngine;
use crate::application::report::{persist_report, render_report};
use crate::domain::checks::evaluate;
use crate::domain::configuration::AppConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::TableSource;
use crate::domain::report::{DatasetMetadata, Report};
use crate::domain::table::FileFormat;
use crate::error::DataCheckError;
use crate::infrastructure::fs::resolve_inside;
use crate::infrastructure::loaders::FileTableLoader;
use crate::infrastructure::templating::{ERROR_TEMPLATE, NOT_FOUND_TEMPLATE};

#[derive(Debug)]
pub struct ValidationOutcome {
    pub report: Report,
    pub report_path: PathBuf,
    pub html: String,
}

/// A rendered error page plus the class of failure behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct FailurePage {
    pub client_error: bool,
    pub html: String,
}

pub struct ValidationService {
    config: AppConfig,
    engine: Box<dyn TemplateEngine>,
    source: Box<dyn TableSource + Send + Sync>,
}

impl ValidationService {
    pub fn new(config: AppConfig, engine: impl TemplateEngine + 'static) -> Self {
        Self {
            config,
            engine: Box::new(engine),
            source: Box::new(FileTableLoader),
        }
    }

    /// Replaces the filesystem loader.
    pub fn with_source(mut self, source: impl TableSource + Send + Sync + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads, checks, renders and persists the report for `path`.
    #[instrument(skip(self))]
    pub fn validate_path(&self, path: &Path) -> Result<ValidationOutcome, DataCheckError> {
        let report = assess(self.source.as_ref(), path)?;

        let html = render_report(self.engine.as_ref(), &report)?;
        let report_path =
            persist_report(&self.config.report_dir, &report.source_filename, &html)?;

        Ok(ValidationOutcome {
            report,
            report_path,
            html,
        })
    }

    /// Validates a file previously stored by the upload intake. `name` is
    /// relative to the upload directory.
    pub fn validate_stored(&self, name: &str) -> Result<ValidationOutcome, DataCheckError> {
        let path = resolve_inside(&self.config.upload_dir, name)
            .ok_or_else(|| DataCheckError::UnsafePath(name.to_string()))?;
        self.validate_path(&path)
    }

    /// Renders the page shown in place of a report when validation fails.
    pub fn render_failure(&self, error: &DataCheckError) -> Result<FailurePage, DataCheckError> {
        let client_error = error.is_client_error();
        if client_error {
            info!(error = %error, "Validation rejected");
        } else {
            warn!(error = %error, "Validation failed");
        }

        let html = match error {
            DataCheckError::Domain(DomainError::MissingInput(filename)) => self
                .engine
                .render(NOT_FOUND_TEMPLATE, &json!({ "filename": filename }))?,
            other => {
                let help = other.help().map(|h| h.to_string());
                self.engine.render(
                    ERROR_TEMPLATE,
                    &json!({ "message": other.to_string(), "help": help }),
                )?
            }
        };

        Ok(FailurePage { client_error, html })
    }
}

/// Loads `path` and runs the check battery over it. Nothing is written.
#[instrument(skip(source))]
pub fn assess(source: &dyn TableSource, path: &Path) -> Result<Report, DataCheckError> {
    let source_filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // 1. Presence
    if !path.is_file() {
        return Err(DomainError::MissingInput(source_filename).into());
    }

    // 2. Format from the extension
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = FileFormat::from_extension(&extension)?;
    let byte_size = fs::metadata(path)?.len();

    // 3. Load
    let table = source.load(path, format)?;

    // 4. Checks
    let results = evaluate(&table);
    let metadata = DatasetMetadata::describe(&source_filename, format, byte_size, &table);
    let report = Report::build(metadata, results, Local::now().naive_local());
    info!(
        total = report.summary.total,
        passed = report.summary.passed,
        failed = report.summary.failed,
        "Checks evaluated"
    );

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::{Column, Table, Value};
    use crate::infrastructure::templating::JinjaRenderer;
    use anyhow::Result;
    use tempfile::{TempDir, tempdir};

    fn service(dir: &TempDir) -> Result<ValidationService> {
        let config = AppConfig {
            upload_dir: dir.path().join("uploads"),
            report_dir: dir.path().join("reports"),
            isolate_uploads: false,
        };
        Ok(ValidationService::new(config, JinjaRenderer::new()?))
    }

    struct FixedSource;

    impl TableSource for FixedSource {
        fn load(&self, _path: &Path, _format: FileFormat) -> Result<Table, DomainError> {
            Table::new(vec![Column::new("n", vec![Value::Int(7), Value::Int(9)])])
        }
    }

    #[test]
    fn test_validate_path_writes_report() -> Result<()> {
        let dir = tempdir()?;
        let svc = service(&dir)?;
        let input = dir.path().join("scores.csv");
        fs::write(&input, "name,score\nada,90\nbob,75\n")?;

        let outcome = svc.validate_path(&input)?;

        assert_eq!(outcome.report_path, dir.path().join("reports/scores.csv_report.html"));
        assert_eq!(fs::read_to_string(&outcome.report_path)?, outcome.html);
        assert_eq!(outcome.report.metadata.row_count, 2);
        assert!(outcome.html.contains("scores.csv"));
        Ok(())
    }

    #[test]
    fn test_missing_input() -> Result<()> {
        let dir = tempdir()?;
        let svc = service(&dir)?;

        let err = svc.validate_path(&dir.path().join("gone.csv")).unwrap_err();
        assert!(matches!(
            err,
            DataCheckError::Domain(DomainError::MissingInput(ref name)) if name == "gone.csv"
        ));

        let page = svc.render_failure(&err)?;
        assert!(page.client_error);
        assert!(page.html.contains("File Not Found"));
        assert!(page.html.contains("gone.csv"));
        Ok(())
    }

    #[test]
    fn test_unsupported_extension_writes_no_report() -> Result<()> {
        let dir = tempdir()?;
        let svc = service(&dir)?;
        let input = dir.path().join("notes.txt");
        fs::write(&input, "a,b\n")?;

        let err = svc.validate_path(&input).unwrap_err();
        assert!(matches!(
            err,
            DataCheckError::Domain(DomainError::UnsupportedFormat { .. })
        ));
        assert!(!dir.path().join("reports").exists());

        let page = svc.render_failure(&err)?;
        assert!(page.html.contains("Validation Error"));
        assert!(page.html.contains("Supported formats: csv, xlsx, xls, json"));
        Ok(())
    }

    #[test]
    fn test_load_error_page_embeds_message() -> Result<()> {
        let dir = tempdir()?;
        let svc = service(&dir)?;
        let input = dir.path().join("bad.json");
        fs::write(&input, "{\"a\": 1, \"b\": <2>}")?;

        let err = svc.validate_path(&input).unwrap_err();
        let page = svc.render_failure(&err)?;

        assert!(page.client_error);
        assert!(page.html.contains("Error reading file:"));
        assert!(!page.html.contains("<2>"));
        Ok(())
    }

    #[test]
    fn test_validate_stored_stays_inside_upload_dir() -> Result<()> {
        let dir = tempdir()?;
        let svc = service(&dir)?;

        let err = svc.validate_stored("../secret.csv").unwrap_err();
        assert!(matches!(err, DataCheckError::UnsafePath(_)));

        let upload = svc.config().upload_dir.join("in.json");
        fs::create_dir_all(svc.config().upload_dir.clone())?;
        fs::write(&upload, r#"[{"x": 1}]"#)?;
        let outcome = svc.validate_stored("in.json")?;
        assert!(outcome.report_path.ends_with("in.json_report.html"));
        Ok(())
    }

    #[test]
    fn test_custom_source_is_used() -> Result<()> {
        let dir = tempdir()?;
        let svc = service(&dir)?.with_source(FixedSource);
        let input = dir.path().join("anything.xlsx");
        fs::write(&input, b"ignored")?;

        let outcome = svc.validate_path(&input)?;
        assert_eq!(outcome.report.metadata.columns, vec!["n"]);
        assert_eq!(outcome.report.metadata.format, FileFormat::Xlsx);
        Ok(())
    }

    #[test]
    fn test_server_errors_are_flagged() -> Result<()> {
        let dir = tempdir()?;
        let svc = service(&dir)?;
        let err = DataCheckError::InternalError("disk on fire".into());

        let page = svc.render_failure(&err)?;
        assert!(!page.client_error);
        assert!(page.html.contains("disk on fire"));
        Ok(())
    }
}
