//! CLI entry point for jobring.

use clap::Parser;
use cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.init_tracing();
    config.run()
}
