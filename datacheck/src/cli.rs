// datacheck/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datacheck")]
#[command(about = "Runs data-quality checks on tabular files and renders HTML reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: ./datacheck.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📤 Uploads a local file and validates it
    Submit {
        /// CSV, XLSX, XLS or JSON file
        file: PathBuf,

        /// Print the rendered page instead of the report path
        #[arg(long)]
        stdout: bool,
    },

    /// 🧪 Validates a file already stored in the upload directory
    Validate {
        /// Path relative to the upload directory
        name: String,

        /// Print the rendered page instead of the report path
        #[arg(long)]
        stdout: bool,
    },

    /// 🔍 Runs the checks and prints the results (writes nothing)
    Inspect {
        file: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}
