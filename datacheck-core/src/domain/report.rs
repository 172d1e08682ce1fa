// datacheck-core/src/domain/report.rs

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::checks::{CheckResult, Scope};
use crate::domain::table::{FileFormat, Table};

/// Timestamp layout shown in report headers.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetMetadata {
    pub source_filename: String,
    pub format: FileFormat,
    pub row_count: usize,
    pub column_count: usize,
    pub byte_size: u64,
    pub columns: Vec<String>,
}

impl DatasetMetadata {
    pub fn describe(
        source_filename: impl Into<String>,
        format: FileFormat,
        byte_size: u64,
        table: &Table,
    ) -> Self {
        Self {
            source_filename: source_filename.into(),
            format,
            row_count: table.row_count(),
            column_count: table.column_count(),
            byte_size,
            columns: table.column_names(),
        }
    }

    pub fn size_kib(&self) -> f64 {
        self.byte_size as f64 / 1024.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// passed / total, in [0, 1]; 0 when there are no checks.
    pub success_rate: f64,
}

impl ReportSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64
        };
        Self {
            total,
            passed,
            failed: total - passed,
            success_rate,
        }
    }

    /// `"87.5%"`
    pub fn success_rate_label(&self) -> String {
        format!("{:.1}%", self.success_rate * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckGroup {
    pub scope: Scope,
    pub passed: usize,
    pub total: usize,
    pub results: Vec<CheckResult>,
}

impl CheckGroup {
    fn new(scope: Scope, results: Vec<CheckResult>) -> Self {
        Self {
            passed: results.iter().filter(|r| r.passed).count(),
            total: results.len(),
            scope,
            results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub source_filename: String,
    pub generated_at: String,
    pub metadata: DatasetMetadata,
    pub summary: ReportSummary,
    pub groups: Vec<CheckGroup>,
}

impl Report {
    /// Aggregates results into a summary and scope groups: the table group
    /// first, then one group per column in column order.
    pub fn build(
        metadata: DatasetMetadata,
        results: Vec<CheckResult>,
        generated_at: NaiveDateTime,
    ) -> Self {
        let summary = ReportSummary::from_results(&results);

        let mut scopes: Vec<Scope> = vec![Scope::Table];
        for name in &metadata.columns {
            let scope = Scope::Column(name.clone());
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
        // Results for scopes outside the metadata still get a group.
        for result in &results {
            if !scopes.contains(&result.scope) {
                scopes.push(result.scope.clone());
            }
        }

        let mut buckets: Vec<Vec<CheckResult>> = vec![Vec::new(); scopes.len()];
        for result in results {
            if let Some(idx) = scopes.iter().position(|s| *s == result.scope) {
                buckets[idx].push(result);
            }
        }

        let groups = scopes
            .into_iter()
            .zip(buckets)
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(scope, bucket)| CheckGroup::new(scope, bucket))
            .collect();

        Self {
            source_filename: metadata.source_filename.clone(),
            generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            metadata,
            summary,
            groups,
        }
    }

    pub fn table_group(&self) -> Option<&CheckGroup> {
        self.groups.iter().find(|g| g.scope == Scope::Table)
    }

    pub fn column_groups(&self) -> impl Iterator<Item = &CheckGroup> {
        self.groups.iter().filter(|g| g.scope != Scope::Table)
    }

    pub fn results(&self) -> impl Iterator<Item = &CheckResult> {
        self.groups.iter().flat_map(|g| g.results.iter())
    }
}
