// datacheck-core/src/infrastructure/loaders/mod.rs

pub mod delimited;
pub mod infer;
pub mod json;
pub mod spreadsheet;

use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::ports::TableSource;
use crate::domain::table::{FileFormat, Table};

/// Reads CSV, Excel and JSON files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTableLoader;

impl TableSource for FileTableLoader {
    #[instrument(skip(self))]
    fn load(&self, path: &Path, format: FileFormat) -> Result<Table, DomainError> {
        let table = match format {
            FileFormat::Csv => delimited::load_csv(path),
            FileFormat::Xlsx | FileFormat::Xls => spreadsheet::load_spreadsheet(path),
            FileFormat::Json => json::load_json(path),
        }?;
        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "Table loaded"
        );
        Ok(table)
    }
}

/// Loads `path` as the format named by `declared_extension`.
pub fn load(path: &Path, declared_extension: &str) -> Result<Table, DomainError> {
    let format = FileFormat::from_extension(declared_extension)?;
    FileTableLoader.load(path, format)
}

pub(crate) fn load_error<E: Display>(err: E) -> DomainError {
    DomainError::Load(err.to_string())
}

pub(crate) fn unnamed(idx: usize) -> String {
    format!("Unnamed: {}", idx)
}

/// Suffixes repeated header names: `x, x, x` -> `x, x.1, x.2`. A suffixed
/// name that is itself taken keeps counting (`x, x, x.1` -> `x, x.1, x.1.1`).
pub(crate) fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|original| {
            let mut name = original;
            let mut seen = counts.get(&name).copied().unwrap_or(0);
            while seen > 0 {
                counts.insert(name.clone(), seen + 1);
                name = format!("{}.{}", name, seen);
                seen = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), seen + 1);
            name
        })
        .collect()
}
