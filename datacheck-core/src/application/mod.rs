// datacheck-core/src/application/mod.rs

pub mod ports;
pub mod report;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use datacheck_core::application::{ValidationService, ...};`
// without knowing the internal file layout.

pub use report::{ReportView, persist_report, render_report, report_file_name};
pub use validation::{FailurePage, ValidationOutcome, ValidationService, assess};
