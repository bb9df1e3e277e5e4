use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use questmap_cli::{Cli, CliConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    questmap_monitoring::init(&config.monitoring()).context("Failed to initialize monitoring")?;

    let output = questmap_cli::run(cli.command, &config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes()).context("Failed to write output")?;
    stdout.flush().context("Failed to write output")?;

    Ok(())
}
