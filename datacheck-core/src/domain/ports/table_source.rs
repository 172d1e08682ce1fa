use std::path::Path;

use crate::domain::error::DomainError;
use crate::domain::table::{FileFormat, Table};

/// Produces an in-memory table from a file of a known format.
pub trait TableSource {
    fn load(&self, path: &Path, format: FileFormat) -> Result<Table, DomainError>;
}
