// datacheck-core/src/domain/checks/battery.rs
//
// The fixed check battery: 3 table-level checks, then per-column checks
// selected by the column classification.

use serde_json::json;
use std::collections::HashSet;
use tracing::{debug, instrument};

use super::stats::{NumericSummary, distinct_values, percent, round_to, text_length_range};
use super::{CheckKind, CheckResult, Scope};
use crate::domain::classify::{ColumnKind, NumericType, classify};
use crate::domain::table::{Column, Table};

/// Longest text value (in characters) `value_length_range` accepts.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Columns with fewer distinct values than this get `values_in_set`.
pub const SMALL_SET_LIMIT: usize = 30;

const SET_SAMPLE_SIZE: usize = 5;

#[instrument(skip(table), fields(rows = table.row_count(), columns = table.column_count()))]
pub fn evaluate(table: &Table) -> Vec<CheckResult> {
    let mut results = table_checks(table);
    for column in table.columns() {
        results.extend(column_checks(column, table.row_count()));
    }
    debug!(checks = results.len(), "Check battery evaluated");
    results
}

// --- TABLE LEVEL ---

fn table_checks(table: &Table) -> Vec<CheckResult> {
    let rows = table.row_count();
    let names = table.column_names();

    let mut seen = HashSet::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for name in &names {
        if !seen.insert(name.as_str()) && !duplicates.contains(&name.as_str()) {
            duplicates.push(name.as_str());
        }
    }
    let unique = duplicates.is_empty();
    let outcome = if unique {
        "No duplicate columns"
    } else {
        "Duplicate columns found"
    };

    vec![
        CheckResult::new(
            CheckKind::RowCountPositive,
            Scope::Table,
            rows > 0,
            json!({
                "observed_value": rows,
                "element_count": rows,
            }),
        ),
        CheckResult::new(
            CheckKind::ColumnsPresent,
            Scope::Table,
            true,
            json!({
                "observed_value": names,
                "details": format!("Table has {} columns", names.len()),
            }),
        ),
        CheckResult::new(
            CheckKind::ColumnsUnique,
            Scope::Table,
            unique,
            json!({
                "observed_value": outcome,
                "duplicates": duplicates,
            }),
        ),
    ]
}

// --- COLUMN LEVEL ---

fn column_checks(column: &Column, rows: usize) -> Vec<CheckResult> {
    let scope = Scope::Column(column.name.clone());
    let nulls = column.null_count();
    let non_null = column.len() - nulls;

    let mut results = vec![CheckResult::new(
        CheckKind::NotNull,
        scope.clone(),
        nulls == 0,
        json!({
            "element_count": rows,
            "null_count": nulls,
            "null_percent": round_to(percent(nulls, rows), 2),
        }),
    )];

    if non_null == 0 {
        return results;
    }

    let kind = classify(column);
    debug!(column = %column.name, dtype = kind.dtype(), "Column classified");

    let distinct = distinct_values(column);

    match kind {
        ColumnKind::Numeric(numeric) => {
            results.extend(numeric_checks(column, &scope, numeric, nulls));
            results.extend(unique_check(&scope, distinct.len(), rows));
        }
        ColumnKind::Text { .. } => {
            results.extend(text_checks(column, &scope, kind));
            results.extend(unique_check(&scope, distinct.len(), rows));
        }
        ColumnKind::DateTime => {
            results.push(CheckResult::new(
                CheckKind::TypeDatetime,
                scope.clone(),
                true,
                json!({
                    "observed_value": "datetime",
                    "dtype": kind.dtype(),
                    "details": "Column is datetime type",
                }),
            ));
        }
        ColumnKind::Other => {}
    }

    if (1..SMALL_SET_LIMIT).contains(&distinct.len()) {
        let observed: Vec<serde_json::Value> = distinct
            .iter()
            .take(SET_SAMPLE_SIZE)
            .map(|v| v.to_json())
            .collect();
        // Membership is not enforced yet: every observed value is "expected".
        let unexpected = 0;
        results.push(CheckResult::new(
            CheckKind::ValuesInSet,
            scope,
            unexpected == 0,
            json!({
                "observed_value": format!("{} unique values", distinct.len()),
                "unique_count": distinct.len(),
                "element_count": non_null,
                "null_count": nulls,
                "unexpected_count": unexpected,
                "observed_values": observed,
            }),
        ));
    }

    results
}

fn numeric_checks(
    column: &Column,
    scope: &Scope,
    numeric: NumericType,
    nulls: usize,
) -> Vec<CheckResult> {
    let Some(summary) = NumericSummary::compute(column) else {
        return Vec::new();
    };
    let bound = |x: f64| number_json(x, numeric);
    let (min, max) = (summary.min, summary.max);

    vec![
        CheckResult::new(
            CheckKind::TypeNumeric,
            scope.clone(),
            true,
            json!({
                "observed_value": numeric.dtype(),
                "details": "Column is numeric type",
            }),
        ),
        CheckResult::new(
            CheckKind::ValueRange,
            scope.clone(),
            true,
            json!({
                "min": bound(min),
                "max": bound(max),
                "element_count": summary.count,
                "null_count": nulls,
            }),
        ),
        CheckResult::new(
            CheckKind::MeanInRange,
            scope.clone(),
            min <= summary.mean && summary.mean <= max,
            json!({
                "observed_value": statistic_json(summary.mean),
                "min": bound(min),
                "max": bound(max),
            }),
        ),
        CheckResult::new(
            CheckKind::MedianInRange,
            scope.clone(),
            min <= summary.median && summary.median <= max,
            json!({
                "observed_value": statistic_json(summary.median),
                "min": bound(min),
                "max": bound(max),
            }),
        ),
    ]
}

fn text_checks(column: &Column, scope: &Scope, kind: ColumnKind) -> Vec<CheckResult> {
    let (min_length, max_length) = text_length_range(column).unwrap_or((0, 0));
    let within = max_length <= MAX_TEXT_LENGTH;
    let details = if within {
        "String lengths within acceptable range".to_string()
    } else {
        format!("Some strings exceed {} chars", MAX_TEXT_LENGTH)
    };

    vec![
        CheckResult::new(
            CheckKind::TypeString,
            scope.clone(),
            true,
            json!({
                "observed_value": "string/object",
                "dtype": kind.dtype(),
                "details": "Column is string/object type",
            }),
        ),
        CheckResult::new(
            CheckKind::ValueLengthRange,
            scope.clone(),
            within,
            json!({
                "min_length": min_length,
                "max_length": max_length,
                "max_allowed": MAX_TEXT_LENGTH,
                "details": details,
            }),
        ),
    ]
}

/// Emitted only when every row holds a distinct non-null value.
fn unique_check(scope: &Scope, distinct: usize, rows: usize) -> Option<CheckResult> {
    (distinct == rows).then(|| {
        CheckResult::new(
            CheckKind::ValuesUnique,
            scope.clone(),
            true,
            json!({
                "observed_value": "All values are unique",
                "unique_count": distinct,
                "total_count": rows,
            }),
        )
    })
}

fn number_json(x: f64, numeric: NumericType) -> serde_json::Value {
    match numeric {
        _ if !x.is_finite() => non_finite_json(x),
        NumericType::Int | NumericType::Bool if x.fract() == 0.0 => json!(x as i64),
        _ => json!(x),
    }
}

/// Means and medians, rounded to 4 places.
fn statistic_json(x: f64) -> serde_json::Value {
    if x.is_finite() {
        json!(round_to(x, 4))
    } else {
        non_finite_json(x)
    }
}

/// JSON has no infinities; they are written as text.
fn non_finite_json(x: f64) -> serde_json::Value {
    let text = if x.is_nan() {
        "nan"
    } else if x > 0.0 {
        "inf"
    } else {
        "-inf"
    };
    json!(text)
}
