// datacheck-core/src/application/report.rs

use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::application::ports::TemplateEngine;
use crate::domain::checks::CheckResult;
use crate::domain::report::{CheckGroup, Report};
use crate::error::DataCheckError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::infrastructure::templating::REPORT_TEMPLATE;

// --- DTOs ---
// Exactly what the report page displays, already formatted.

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub source_filename: String,
    pub generated_at: String,
    pub summary: SummaryView,
    pub dataset: DatasetView,
    pub table_group: Option<GroupView>,
    pub column_groups: Vec<GroupView>,
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub success_rate: String,
}

#[derive(Debug, Serialize)]
pub struct DatasetView {
    pub rows: usize,
    pub columns: usize,
    pub size_kib: String,
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct GroupView {
    pub name: String,
    pub passed: usize,
    pub total: usize,
    pub results: Vec<CheckView>,
}

#[derive(Debug, Serialize)]
pub struct CheckView {
    pub kind: &'static str,
    pub title: String,
    pub passed: bool,
    pub detail: String,
}

impl ReportView {
    pub fn from_report(report: &Report) -> Result<Self, InfrastructureError> {
        let metadata = &report.metadata;
        let table_group = report.table_group().map(GroupView::from_group).transpose()?;
        let column_groups = report
            .column_groups()
            .map(GroupView::from_group)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source_filename: report.source_filename.clone(),
            generated_at: report.generated_at.clone(),
            summary: SummaryView {
                total: report.summary.total,
                passed: report.summary.passed,
                failed: report.summary.failed,
                success_rate: report.summary.success_rate_label(),
            },
            dataset: DatasetView {
                rows: metadata.row_count,
                columns: metadata.column_count,
                size_kib: format!("{:.2}", metadata.size_kib()),
                format: metadata.format.label().to_string(),
            },
            table_group,
            column_groups,
        })
    }
}

impl GroupView {
    fn from_group(group: &CheckGroup) -> Result<Self, InfrastructureError> {
        Ok(Self {
            name: group.scope.to_string(),
            passed: group.passed,
            total: group.total,
            results: group
                .results
                .iter()
                .map(CheckView::from_result)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl CheckView {
    fn from_result(result: &CheckResult) -> Result<Self, InfrastructureError> {
        Ok(Self {
            kind: result.kind.as_str(),
            title: result.kind.title(),
            passed: result.passed,
            detail: serde_json::to_string_pretty(&result.detail)?,
        })
    }
}

pub fn render_report(
    engine: &dyn TemplateEngine,
    report: &Report,
) -> Result<String, DataCheckError> {
    let view = ReportView::from_report(report)?;
    let context = serde_json::to_value(view).map_err(InfrastructureError::from)?;
    engine.render(REPORT_TEMPLATE, &context)
}

/// `sales.csv` -> `sales.csv_report.html`
pub fn report_file_name(source_filename: &str) -> String {
    format!("{}_report.html", source_filename)
}

/// Atomically writes the rendered report, replacing any previous report for
/// the same source filename.
#[instrument(skip(html))]
pub fn persist_report(
    report_dir: &Path,
    source_filename: &str,
    html: &str,
) -> Result<PathBuf, DataCheckError> {
    let path = report_dir.join(report_file_name(source_filename));
    atomic_write(&path, html)
        .with_context(|| format!("Failed to write report to {:?}", path))
        .map_err(|e| DataCheckError::InternalError(format!("{:#}", e)))?;
    info!(path = ?path, "Report written");
    Ok(path)
}
