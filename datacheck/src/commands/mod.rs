// datacheck/src/commands/mod.rs

pub mod inspect;
pub mod submit;
pub mod validate;

use std::path::Path;

use datacheck_core::DataCheckError;
use datacheck_core::application::{ValidationOutcome, ValidationService};
use datacheck_core::infrastructure::JinjaRenderer;
use datacheck_core::infrastructure::config::load_app_config;

/// Loads the configuration and wires the service to the Jinja renderer.
pub fn build_service(config: Option<&Path>) -> Result<ValidationService, DataCheckError> {
    let working_dir = std::env::current_dir()?;
    let config = load_app_config(config, &working_dir)?;
    let engine = JinjaRenderer::new()?;
    Ok(ValidationService::new(config, engine))
}

/// Prints the outcome of a validation. With `stdout`, the rendered page
/// (report or failure page) is the only thing written to stdout.
pub fn deliver(
    service: &ValidationService,
    result: Result<ValidationOutcome, DataCheckError>,
    stdout: bool,
) -> anyhow::Result<()> {
    match result {
        Ok(outcome) if stdout => {
            print!("{}", outcome.html);
            Ok(())
        }
        Ok(outcome) => {
            let summary = outcome.report.summary;
            println!(
                "🧪 {}/{} checks passed ({})",
                summary.passed,
                summary.total,
                summary.success_rate_label()
            );
            println!("📄 Report written to {}", outcome.report_path.display());
            Ok(())
        }
        Err(err) => {
            if stdout {
                let page = service.render_failure(&err)?;
                print!("{}", page.html);
            }
            Err(err.into())
        }
    }
}
