// datacheck-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unsupported file format: '{extension}'")]
    #[diagnostic(
        code(datacheck::domain::unsupported_format),
        help("Supported formats: {supported}")
    )]
    UnsupportedFormat {
        extension: String,
        supported: String,
    },

    #[error("Error reading file: {0}")]
    #[diagnostic(
        code(datacheck::domain::load),
        help("The file could not be parsed. Check that its content matches its extension.")
    )]
    Load(String),

    #[error("File '{0}' could not be found")]
    #[diagnostic(
        code(datacheck::domain::missing_input),
        help("Please upload the file again.")
    )]
    MissingInput(String),

    #[error("Upload rejected: {0}")]
    #[diagnostic(code(datacheck::domain::rejected_upload))]
    RejectedUpload(String),
}
