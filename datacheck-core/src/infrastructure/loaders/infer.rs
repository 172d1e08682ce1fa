// datacheck-core/src/infrastructure/loaders/infer.rs
//
// Cell typing shared by the loaders. A column is typed as a whole: it only
// becomes integer/float/boolean/datetime when every non-null cell parses as
// such, otherwise the original text is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::table::Value;

/// Cell contents read as missing values.
pub const NA_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_na(cell: &str) -> bool {
    NA_MARKERS.contains(&cell)
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// ISO-8601 dates and date-times; offsets are normalized to UTC.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Types a column of raw text cells (`None` = missing).
pub fn type_text_cells(cells: Vec<Option<String>>) -> Vec<Value> {
    let present = || cells.iter().flatten();

    if present().next().is_none() {
        return cells.iter().map(|_| Value::Null).collect();
    }

    if present().all(|c| c.trim().parse::<i64>().is_ok()) {
        return map_cells(cells, |c| c.trim().parse().ok().map(Value::Int));
    }
    if present().all(|c| c.trim().parse::<f64>().is_ok()) {
        return map_cells(cells, |c| c.trim().parse().ok().map(Value::Float));
    }
    if present().all(|c| parse_bool(c).is_some()) {
        return map_cells(cells, |c| parse_bool(c).map(Value::Bool));
    }

    promote_datetimes(map_cells(cells, |c| Some(Value::Text(c.to_string()))))
}

fn map_cells<F>(cells: Vec<Option<String>>, parse: F) -> Vec<Value>
where
    F: Fn(&str) -> Option<Value>,
{
    cells
        .into_iter()
        .map(|cell| cell.and_then(|c| parse(&c)).unwrap_or(Value::Null))
        .collect()
}

/// Turns an all-text column into datetimes when every value is ISO-8601.
pub fn promote_datetimes(values: Vec<Value>) -> Vec<Value> {
    let mut non_null = values.iter().filter(|v| !v.is_null()).peekable();
    if non_null.peek().is_none() {
        return values;
    }
    let all_dates = non_null.all(|v| match v {
        Value::Text(s) => parse_datetime(s).is_some(),
        _ => false,
    });
    if !all_dates {
        return values;
    }

    values
        .into_iter()
        .map(|v| match v {
            Value::Text(s) => parse_datetime(&s).map(Value::DateTime).unwrap_or(Value::Null),
            other => other,
        })
        .collect()
}

/// Collapses an all-integral float column onto integers.
pub fn narrow_integral_floats(values: Vec<Value>) -> Vec<Value> {
    let integral = values.iter().filter(|v| !v.is_null()).all(|v| match v {
        Value::Int(_) => true,
        Value::Float(f) => f.fract() == 0.0 && f.abs() < 9.0e15,
        _ => false,
    });
    if !integral {
        return values;
    }
    values
        .into_iter()
        .map(|v| match v {
            Value::Float(f) if !f.is_nan() => Value::Int(f as i64),
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[Option<&str>]) -> Vec<Option<String>> {
        raw.iter().map(|c| c.map(String::from)).collect()
    }

    #[test]
    fn test_na_markers() {
        assert!(is_na(""));
        assert!(is_na("NULL"));
        assert!(is_na("n/a"));
        assert!(!is_na("0"));
        assert!(!is_na("none"));
    }

    #[test]
    fn test_integer_column() {
        let typed = type_text_cells(cells(&[Some("1"), None, Some(" 42")]));
        assert_eq!(typed, vec![Value::Int(1), Value::Null, Value::Int(42)]);
    }

    #[test]
    fn test_float_column_absorbs_integers() {
        let typed = type_text_cells(cells(&[Some("1"), Some("2.5")]));
        assert_eq!(typed, vec![Value::Float(1.0), Value::Float(2.5)]);
    }

    #[test]
    fn test_bool_column() {
        let typed = type_text_cells(cells(&[Some("True"), Some("false")]));
        assert_eq!(typed, vec![Value::Bool(true), Value::Bool(false)]);
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let typed = type_text_cells(cells(&[Some("1"), Some("abc")]));
        assert_eq!(
            typed,
            vec![Value::Text("1".into()), Value::Text("abc".into())]
        );
    }

    #[test]
    fn test_dates_are_promoted() {
        let typed = type_text_cells(cells(&[Some("2024-01-31"), None, Some("2024-02-01T10:00:00Z")]));
        assert!(matches!(typed[0], Value::DateTime(_)));
        assert_eq!(typed[1], Value::Null);
        assert!(matches!(typed[2], Value::DateTime(_)));

        let typed = type_text_cells(cells(&[Some("2024-01-31"), Some("tomorrow")]));
        assert!(matches!(typed[0], Value::Text(_)));
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert!(parse_datetime("2024-03-01 12:30:45.123").is_some());
        assert!(parse_datetime("2024-03-01T12:30").is_some());
        assert!(parse_datetime("2024-03-01T12:30:00+02:00").is_some());
        assert!(parse_datetime("01/03/2024").is_none());
        assert!(parse_datetime("20240301").is_none());
    }

    #[test]
    fn test_narrow_integral_floats() {
        let narrowed = narrow_integral_floats(vec![Value::Float(2.0), Value::Null, Value::Int(3)]);
        assert_eq!(narrowed, vec![Value::Int(2), Value::Null, Value::Int(3)]);

        let kept = narrow_integral_floats(vec![Value::Float(2.5)]);
        assert_eq!(kept, vec![Value::Float(2.5)]);
    }
}
