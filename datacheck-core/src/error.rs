// datacheck-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DataCheckError {
    // --- DOMAIN ERRORS (format, parsing, missing input, rejected upload) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, templates, config) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    #[diagnostic(code(datacheck::internal))]
    InternalError(String),

    #[error("Unsafe path traversal detected: {0}")]
    #[diagnostic(
        code(datacheck::unsafe_path),
        help("Uploaded and validated files must live directly inside the upload directory.")
    )]
    UnsafePath(String),
}

impl DataCheckError {
    /// Whether the failure was caused by the caller's input rather than by the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            DataCheckError::Domain(_) | DataCheckError::UnsafePath(_) => true,
            DataCheckError::Infrastructure(_) | DataCheckError::InternalError(_) => false,
        }
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for DataCheckError {
    fn from(err: std::io::Error) -> Self {
        DataCheckError::Infrastructure(InfrastructureError::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_client_errors() {
        let err: DataCheckError = DomainError::Load("bad".into()).into();
        assert!(err.is_client_error());

        let err = DataCheckError::UnsafePath("../etc/passwd".into());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_io_errors_are_server_errors() {
        let err: DataCheckError = std::io::Error::other("disk full").into();
        assert!(!err.is_client_error());
        assert!(matches!(
            err,
            DataCheckError::Infrastructure(InfrastructureError::Io(_))
        ));
    }
}
