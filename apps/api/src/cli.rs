use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ui::progress::DEFAULT_STEP_INTERVAL_MS;

#[derive(Debug, Parser)]
#[command(name = "resume-analyzer", version, about = "AI resume analyzer: upload a PDF, get feedback")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Upload a PDF to a running server and print the analysis
    Analyze {
        /// Resume to analyze
        file: PathBuf,
        /// Base URL of the server
        #[arg(long, env = "ANALYZER_URL", default_value = "http://localhost:8080")]
        server: String,
        /// Milliseconds between progress steps
        #[arg(long, default_value_t = DEFAULT_STEP_INTERVAL_MS)]
        step_interval_ms: u64,
    },
}
