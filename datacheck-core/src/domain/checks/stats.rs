// datacheck-core/src/domain/checks/stats.rs

use chrono::NaiveDateTime;
use std::collections::HashSet;

use crate::domain::table::{Column, Value};

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl NumericSummary {
    /// Returns `None` when the column has no numeric values.
    pub fn compute(column: &Column) -> Option<Self> {
        let mut values: Vec<f64> = column.non_null().filter_map(Value::as_f64).collect();
        if values.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        // Incremental mean: stays a convex combination of the inputs.
        let mut mean = 0.0;
        for (i, &x) in values.iter().enumerate() {
            min = min.min(x);
            max = max.max(x);
            mean += (x - mean) / (i + 1) as f64;
        }
        // inf - inf poisons the incremental form; a plain sum gives +-inf.
        if values.iter().any(|x| !x.is_finite()) {
            mean = values.iter().sum::<f64>() / values.len() as f64;
        }

        values.sort_by(f64::total_cmp);
        let mid = values.len() / 2;
        let median = if values.len() % 2 == 1 {
            values[mid]
        } else {
            midpoint(values[mid - 1], values[mid])
        };

        Some(Self {
            count: values.len(),
            min,
            max,
            mean,
            median,
        })
    }
}

fn midpoint(lo: f64, hi: f64) -> f64 {
    if lo == hi {
        lo
    } else if lo.is_finite() && hi.is_finite() {
        lo + (hi - lo) / 2.0
    } else {
        (lo + hi) / 2.0
    }
}

/// Hashable identity of a cell. Integral floats collapse onto integers so
/// `1` and `1.0` count once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(&'a str),
    DateTime(NaiveDateTime),
}

fn key_of(value: &Value) -> Option<ValueKey<'_>> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(ValueKey::Bool(*b)),
        Value::Int(i) => Some(ValueKey::Int(*i)),
        Value::Float(f) if f.is_nan() => None,
        Value::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 9.0e15 {
                Some(ValueKey::Int(*f as i64))
            } else {
                Some(ValueKey::Float(f.to_bits()))
            }
        }
        Value::Text(s) => Some(ValueKey::Text(s.as_str())),
        Value::DateTime(dt) => Some(ValueKey::DateTime(*dt)),
    }
}

/// Distinct non-null values in first-seen order.
pub fn distinct_values(column: &Column) -> Vec<&Value> {
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for value in &column.values {
        if let Some(key) = key_of(value) {
            if seen.insert(key) {
                distinct.push(value);
            }
        }
    }
    distinct
}

/// (min, max) character length over the text form of non-null values.
pub fn text_length_range(column: &Column) -> Option<(usize, usize)> {
    column
        .non_null()
        .map(|v| v.to_text().chars().count())
        .fold(None, |acc, len| match acc {
            None => Some((len, len)),
            Some((lo, hi)) => Some((lo.min(len), hi.max(len))),
        })
}
