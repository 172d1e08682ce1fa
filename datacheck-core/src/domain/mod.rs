pub mod checks;
pub mod classify;
pub mod configuration;
pub mod error;
pub mod ports;
pub mod report;
pub mod table;

// Handy re-exports to simplify imports elsewhere
pub use checks::{CheckKind, CheckResult, Scope, evaluate};
pub use classify::{ColumnKind, NumericType, classify};
pub use configuration::AppConfig;
pub use error::DomainError;
pub use report::{CheckGroup, DatasetMetadata, Report, ReportSummary};
pub use table::{Column, FileFormat, Table, Value};
