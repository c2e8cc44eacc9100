//! Command-line configuration.

use crate::commands::{Command, CommandResult};
use clap::{Parser, ValueEnum};
use std::io;
use tracing_subscriber::EnvFilter;

/// Output format for distributions and ring dumps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per server.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Assign jobs to servers with a consistent hash ring.
#[derive(Parser, Debug)]
#[command(name = "jobring", version, about)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "JOBRING_LOG", default_value = "warn")]
    pub log_level: String,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Installs the global subscriber. Logs go to stderr.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        // Already installed when running more than once in a process.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    }

    /// Runs the selected command against the process stdin/stdout.
    pub fn run(&self) -> CommandResult {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.command
            .execute(self.format, stdin.lock(), stdout.lock())
    }
}
