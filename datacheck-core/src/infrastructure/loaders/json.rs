// datacheck-core/src/infrastructure/loaders/json.rs
//
// Accepted layouts:
//   [ {"a": 1, "b": 2}, ... ]          records
//   [ [1, 2], [3, 4] ]                 rows (columns named 0..n)
//   { "a": {"0": 1, "1": 2}, ... }     column -> index -> value
//   { "a": [1, 2], "b": [3, 4] }       column -> values

use serde_json::{Map, Value as Json};
use std::fs;
use std::path::Path;

use super::infer::promote_datetimes;
use super::load_error;
use crate::domain::error::DomainError;
use crate::domain::table::{Column, Table, Value};

pub fn load_json(path: &Path) -> Result<Table, DomainError> {
    let content = fs::read_to_string(path).map_err(load_error)?;
    let root: Json = serde_json::from_str(&content).map_err(load_error)?;
    table_from_json(root)
}

pub fn table_from_json(root: Json) -> Result<Table, DomainError> {
    // Records and rows count even when they carry no fields.
    let mut item_count = 0;
    let columns = match root {
        Json::Array(items) if items.is_empty() => Vec::new(),
        Json::Array(items) if items.iter().all(Json::is_object) => {
            item_count = items.len();
            from_records(items)
        }
        Json::Array(items) if items.iter().all(Json::is_array) => {
            item_count = items.len();
            from_rows(items)
        }
        Json::Array(_) => {
            return Err(unrecognized(
                "array items must all be objects or all be arrays",
            ));
        }
        Json::Object(map) if map.is_empty() => Vec::new(),
        Json::Object(map) if map.values().all(Json::is_object) => from_indexed_columns(map),
        Json::Object(map) if map.values().all(Json::is_array) => from_array_columns(map),
        Json::Object(_) => {
            return Err(unrecognized(
                "object values must all be objects or all be arrays",
            ));
        }
        _ => {
            return Err(unrecognized(
                "top-level value must be an array or an object",
            ));
        }
    };

    if columns.is_empty() {
        return Ok(Table::without_columns(item_count));
    }

    Table::new(
        columns
            .into_iter()
            .map(|(name, values)| Column::new(name, promote_datetimes(values)))
            .collect(),
    )
}

fn unrecognized(reason: &str) -> DomainError {
    DomainError::Load(format!("Unrecognized JSON structure: {}", reason))
}

type RawColumns = Vec<(String, Vec<Value>)>;

fn from_records(items: Vec<Json>) -> RawColumns {
    let mut names: Vec<String> = Vec::new();
    for item in &items {
        if let Json::Object(record) = item {
            for key in record.keys() {
                if !names.contains(key) {
                    names.push(key.clone());
                }
            }
        }
    }

    names
        .into_iter()
        .map(|name| {
            let values = items
                .iter()
                .map(|item| item.get(&name).map(cell).unwrap_or(Value::Null))
                .collect();
            (name, values)
        })
        .collect()
}

fn from_rows(items: Vec<Json>) -> RawColumns {
    let width = items
        .iter()
        .filter_map(Json::as_array)
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    (0..width)
        .map(|idx| {
            let values = items
                .iter()
                .map(|row| row.get(idx).map(cell).unwrap_or(Value::Null))
                .collect();
            (idx.to_string(), values)
        })
        .collect()
}

fn from_indexed_columns(map: Map<String, Json>) -> RawColumns {
    let mut index: Vec<String> = Vec::new();
    for inner in map.values().filter_map(Json::as_object) {
        for key in inner.keys() {
            if !index.contains(key) {
                index.push(key.clone());
            }
        }
    }

    map.into_iter()
        .map(|(name, inner)| {
            let values = index
                .iter()
                .map(|key| inner.get(key).map(cell).unwrap_or(Value::Null))
                .collect();
            (name, values)
        })
        .collect()
}

/// Arrays of differing lengths are rejected by `Table::new`.
fn from_array_columns(map: Map<String, Json>) -> RawColumns {
    map.into_iter()
        .map(|(name, values)| {
            let values = match values {
                Json::Array(items) => items.iter().map(cell).collect(),
                _ => Vec::new(),
            };
            (name, values)
        })
        .collect()
}

fn cell(value: &Json) -> Value {
    match value {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                n.as_f64().map(Value::Float).unwrap_or(Value::Null)
            }
        }
        Json::String(s) => Value::Text(s.clone()),
        nested @ (Json::Array(_) | Json::Object(_)) => Value::Text(nested.to_string()),
    }
}
