// datacheck-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(datacheck::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(datacheck::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(datacheck::infra::config))]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(datacheck::infra::config_missing))]
    ConfigNotFound(String),

    // --- SERIALIZATION ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(datacheck::infra::json))]
    JsonError(#[from] serde_json::Error),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(datacheck::infra::template),
        help("Check the Jinja syntax ({{ ... }}) of the embedded report templates.")
    )]
    TemplateError(#[from] minijinja::Error),
}
