// datacheck-core/src/infrastructure/loaders/spreadsheet.rs

use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use super::infer::{narrow_integral_floats, parse_datetime, promote_datetimes};
use super::{dedupe_names, load_error, unnamed};
use crate::domain::error::DomainError;
use crate::domain::table::{Column, Table, Value};

/// Reads the first worksheet of an `.xlsx`/`.xls` workbook. The first row
/// holds the column names.
pub fn load_spreadsheet(path: &Path) -> Result<Table, DomainError> {
    let mut workbook = open_workbook_auto(path).map_err(load_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DomainError::Load("Workbook contains no worksheets".into()))?
        .map_err(load_error)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| DomainError::Load("No columns to parse from file".into()))?;

    let names = dedupe_names(
        header
            .iter()
            .enumerate()
            .map(|(idx, data)| match cell(data) {
                Value::Null => unnamed(idx),
                value => value.to_text(),
            })
            .collect(),
    );

    let mut values: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(row.get(idx).map(cell).unwrap_or(Value::Null));
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, values)| {
            Column::new(name, promote_datetimes(narrow_integral_floats(values)))
        })
        .collect();

    Table::new(columns)
}

pub(crate) fn cell(data: &Data) -> Value {
    match data {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTime(dt) => dt.as_datetime().map(Value::DateTime).unwrap_or(Value::Null),
        Data::DateTimeIso(s) => parse_datetime(s)
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Text(s.clone())),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}
