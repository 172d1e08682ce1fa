// datacheck-core/src/domain/classify.rs
//
// Each column is classified exactly once. The check battery branches on the
// resulting variant and never inspects cell types itself.

use serde::Serialize;

use crate::domain::table::{Column, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericType {
    Int,
    Float,
    Bool,
}

impl NumericType {
    pub fn dtype(&self) -> &'static str {
        match self {
            NumericType::Int => "int64",
            NumericType::Float => "float64",
            NumericType::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric(NumericType),
    /// Strings, or a mix of value types with no single numeric/datetime reading.
    Text { mixed: bool },
    DateTime,
    /// No non-null values to classify.
    Other,
}

impl ColumnKind {
    pub fn dtype(&self) -> &'static str {
        match self {
            ColumnKind::Numeric(n) => n.dtype(),
            ColumnKind::Text { mixed: false } => "string",
            ColumnKind::Text { mixed: true } => "object",
            ColumnKind::DateTime => "datetime64[ns]",
            ColumnKind::Other => "unknown",
        }
    }
}

#[derive(Default)]
struct Seen {
    bools: usize,
    ints: usize,
    floats: usize,
    texts: usize,
    datetimes: usize,
}

pub fn classify(column: &Column) -> ColumnKind {
    let mut seen = Seen::default();
    for value in column.non_null() {
        match value {
            Value::Bool(_) => seen.bools += 1,
            Value::Int(_) => seen.ints += 1,
            Value::Float(_) => seen.floats += 1,
            Value::Text(_) => seen.texts += 1,
            Value::DateTime(_) => seen.datetimes += 1,
            Value::Null => {}
        }
    }

    let total = seen.bools + seen.ints + seen.floats + seen.texts + seen.datetimes;
    if total == 0 {
        return ColumnKind::Other;
    }

    let numeric = seen.ints + seen.floats;
    if seen.bools == total {
        ColumnKind::Numeric(NumericType::Bool)
    } else if seen.ints == total {
        ColumnKind::Numeric(NumericType::Int)
    } else if numeric == total {
        ColumnKind::Numeric(NumericType::Float)
    } else if seen.datetimes == total {
        ColumnKind::DateTime
    } else {
        ColumnKind::Text {
            mixed: seen.texts != total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn col(values: Vec<Value>) -> Column {
        Column::new("c", values)
    }

    #[test]
    fn test_integers_and_floats_are_numeric() {
        assert_eq!(
            classify(&col(vec![Value::Int(1), Value::Null, Value::Int(3)])),
            ColumnKind::Numeric(NumericType::Int)
        );
        assert_eq!(
            classify(&col(vec![Value::Int(1), Value::Float(2.5)])),
            ColumnKind::Numeric(NumericType::Float)
        );
        assert_eq!(
            classify(&col(vec![Value::Bool(true), Value::Bool(false)])),
            ColumnKind::Numeric(NumericType::Bool)
        );
    }

    #[test]
    fn test_mixed_values_fall_back_to_text() {
        let kind = classify(&col(vec![Value::Int(1), Value::Text("a".into())]));
        assert_eq!(kind, ColumnKind::Text { mixed: true });

        let kind = classify(&col(vec![Value::Bool(true), Value::Int(1)]));
        assert_eq!(kind, ColumnKind::Text { mixed: true });

        let kind = classify(&col(vec![Value::Text("a".into())]));
        assert_eq!(kind, ColumnKind::Text { mixed: false });
    }

    #[test]
    fn test_datetime_and_empty() {
        let dt = NaiveDate::from_ymd_opt(2023, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Value::DateTime)
            .unwrap_or(Value::Null);
        assert_eq!(classify(&col(vec![dt, Value::Null])), ColumnKind::DateTime);
        assert_eq!(classify(&col(vec![Value::Null, Value::Null])), ColumnKind::Other);
        assert_eq!(classify(&col(vec![Value::Float(f64::NAN)])), ColumnKind::Other);
    }
}
