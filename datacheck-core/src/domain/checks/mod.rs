// datacheck-core/src/domain/checks/mod.rs

pub mod battery;
pub mod stats;

use serde::Serialize;
use std::fmt;

pub use battery::{MAX_TEXT_LENGTH, SMALL_SET_LIMIT, evaluate};

/// The closed set of expectations the battery can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    // Table level
    RowCountPositive,
    ColumnsPresent,
    ColumnsUnique,
    // Column level
    NotNull,
    TypeNumeric,
    ValueRange,
    MeanInRange,
    MedianInRange,
    ValuesUnique,
    TypeString,
    ValueLengthRange,
    TypeDatetime,
    ValuesInSet,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::RowCountPositive => "row_count_positive",
            CheckKind::ColumnsPresent => "columns_present",
            CheckKind::ColumnsUnique => "columns_unique",
            CheckKind::NotNull => "not_null",
            CheckKind::TypeNumeric => "type_numeric",
            CheckKind::ValueRange => "value_range",
            CheckKind::MeanInRange => "mean_in_range",
            CheckKind::MedianInRange => "median_in_range",
            CheckKind::ValuesUnique => "values_unique",
            CheckKind::TypeString => "type_string",
            CheckKind::ValueLengthRange => "value_length_range",
            CheckKind::TypeDatetime => "type_datetime",
            CheckKind::ValuesInSet => "values_in_set",
        }
    }

    /// `not_null` -> `Not Null`
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Table,
    Column(String),
}

impl Scope {
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Scope::Table => None,
            Scope::Column(name) => Some(name),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Table => f.write_str("table"),
            Scope::Column(name) => f.write_str(name),
        }
    }
}

pub type Detail = serde_json::Map<String, serde_json::Value>;

/// One evaluated expectation. A failed check is a normal value, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub scope: Scope,
    pub passed: bool,
    pub detail: Detail,
}

impl CheckResult {
    pub fn new(kind: CheckKind, scope: Scope, passed: bool, detail: serde_json::Value) -> Self {
        let detail = match detail {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = Detail::new();
                map.insert("observed_value".to_string(), other);
                map
            }
        };
        Self {
            kind,
            scope,
            passed,
            detail,
        }
    }
}
