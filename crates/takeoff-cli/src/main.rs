//! Takeoff CLI - command-line front end for the estimation pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use takeoff_cli::cli::{Cli, Command};
use takeoff_cli::commands;
use takeoff_pipeline::PipelineConfig;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            PipelineConfig::from_toml(&raw).map_err(anyhow::Error::msg)?
        }
        None => PipelineConfig::default(),
    };

    match cli.command {
        Command::Run(args) => commands::execute_run(args, config, cli.json).await,
        Command::Extract(args) => commands::execute_extract(args, config, cli.json),
    }
}
