// datacheck/src/commands/inspect.rs
//
// USE CASE: Run the check battery on a file and print the results.
// Nothing is written to the upload or report directories.

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use std::path::Path;

use datacheck_core::application::assess;
use datacheck_core::domain::CheckResult;
use datacheck_core::infrastructure::FileTableLoader;

pub fn execute(file: &Path, json: bool) -> anyhow::Result<()> {
    let report = assess(&FileTableLoader, file)?;

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", out);
        return Ok(());
    }

    let metadata = &report.metadata;
    println!(
        "🔍 Inspecting '{}' ({}, {} rows x {} columns)",
        report.source_filename,
        metadata.format,
        metadata.row_count,
        metadata.column_count
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Scope", "Check", "Status", "Observed"]);
    for result in report.results() {
        let status = if result.passed {
            Cell::new("PASSED").fg(Color::Green)
        } else {
            Cell::new("FAILED").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(result.scope.to_string()),
            Cell::new(result.kind.title()),
            status,
            Cell::new(observed(result)),
        ]);
    }
    println!("{table}");

    let summary = report.summary;
    println!(
        "📊 {} checks: {} passed, {} failed ({})",
        summary.total,
        summary.passed,
        summary.failed,
        summary.success_rate_label()
    );
    Ok(())
}

fn observed(result: &CheckResult) -> String {
    match result.detail.get("observed_value") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
