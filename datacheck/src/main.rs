// datacheck/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use datacheck_core::DataCheckError;

fn main() -> ExitCode {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=info datacheck submit ... to see pipeline stages.
    // Logs go to stderr so `--stdout` output stays a clean HTML document.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Submit { file, stdout } => {
            commands::submit::execute(cli.config.as_deref(), &file, stdout)
        }
        Commands::Validate { name, stdout } => {
            commands::validate::execute(cli.config.as_deref(), &name, stdout)
        }
        Commands::Inspect { file, json } => commands::inspect::execute(&file, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code(&err);
            match err.downcast::<DataCheckError>() {
                Ok(e) => eprintln!("{:?}", miette::Report::new(e)),
                Err(other) => eprintln!("💥 {:#}", other),
            }
            ExitCode::from(code)
        }
    }
}

/// 1 when the input was at fault, 2 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DataCheckError>() {
        Some(e) if e.is_client_error() => 1,
        _ => 2,
    }
}
