// datacheck-core/src/infrastructure/loaders/delimited.rs

use std::path::Path;

use super::infer::{is_na, type_text_cells};
use super::{dedupe_names, load_error, unnamed};
use crate::domain::error::DomainError;
use crate::domain::table::{Column, Table};

/// Reads a comma-separated file whose first record is the header.
///
/// Short records are padded with nulls; a record with more fields than the
/// header is a load error.
pub fn load_csv(path: &Path) -> Result<Table, DomainError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(load_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(load_error)?
        .iter()
        .map(String::from)
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DomainError::Load("No columns to parse from file".into()));
    }

    let width = headers.len();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(load_error)?;
        if record.len() > width {
            // Header is line 1.
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(idx as u64 + 2);
            return Err(DomainError::Load(format!(
                "Error tokenizing data. Expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            )));
        }
        for (col, column_cells) in cells.iter_mut().enumerate() {
            let cell = record
                .get(col)
                .filter(|c| !is_na(c))
                .map(String::from);
            column_cells.push(cell);
        }
    }

    let names = dedupe_names(
        headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| if name.trim().is_empty() { unnamed(idx) } else { name })
            .collect(),
    );

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column::new(name, type_text_cells(raw)))
        .collect();

    Table::new(columns)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::Value;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn load_str(content: &str) -> Result<Table, DomainError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, content).unwrap();
        load_csv(&path)
    }

    #[test]
    fn test_typed_columns() -> Result<()> {
        let table = load_str("id,name,score\n1,alice,9.5\n2,bob,\n3,,7\n")?;
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_names(), vec!["id", "name", "score"]);

        let cols = table.columns();
        assert_eq!(cols[0].values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(cols[1].values[2], Value::Null);
        assert_eq!(cols[2].values, vec![Value::Float(9.5), Value::Null, Value::Float(7.0)]);
        Ok(())
    }

    #[test]
    fn test_short_rows_are_padded() -> Result<()> {
        let table = load_str("a,b,c\n1,2\n4,5,6\n")?;
        assert_eq!(table.columns()[2].values, vec![Value::Null, Value::Int(6)]);
        Ok(())
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = load_str("a,b\n1,2\n3,4,5\n").unwrap_err();
        match err {
            DomainError::Load(msg) => {
                assert!(msg.contains("Expected 2 fields in line 3, saw 3"), "{msg}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_file_has_no_columns() {
        assert!(matches!(load_str(""), Err(DomainError::Load(_))));
    }

    #[test]
    fn test_header_only_gives_zero_rows() -> Result<()> {
        let table = load_str("a,b\n")?;
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
        Ok(())
    }

    #[test]
    fn test_blank_header_is_unnamed() -> Result<()> {
        let table = load_str("a,\n1,2\n")?;
        assert_eq!(table.column_names(), vec!["a", "Unnamed: 1"]);
        Ok(())
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() -> Result<()> {
        let table = load_str("x,x\n1,a\n2,b\n")?;
        assert_eq!(table.column_names(), vec!["x", "x.1"]);
        assert_eq!(table.columns()[1].values[0], Value::Text("a".into()));
        Ok(())
    }

    #[test]
    fn test_infinity_reads_as_float() -> Result<()> {
        let table = load_str("v\ninf\n1\n")?;
        assert_eq!(
            table.columns()[0].values,
            vec![Value::Float(f64::INFINITY), Value::Float(1.0)]
        );
        Ok(())
    }

    #[test]
    fn test_quoted_fields() -> Result<()> {
        let table = load_str("note\n\"hello, world\"\n\"NA\"\n")?;
        assert_eq!(
            table.columns()[0].values,
            vec![Value::Text("hello, world".into()), Value::Null]
        );
        Ok(())
    }
}
