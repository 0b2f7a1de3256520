//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Takeoff CLI - construction estimation from OCR'd site photographs.
#[derive(Debug, Parser)]
#[command(name = "takeoff")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit results as JSON instead of a plain summary
    #[arg(long, global = true)]
    pub json: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true, env = "TAKEOFF_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full estimation pipeline
    Run(RunArgs),

    /// Extract deduplicated measurements and stop
    Extract(ExtractArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// OCR fragments file (JSON, one entry per source image)
    #[arg(long)]
    pub fragments: PathBuf,

    /// Scope description file (plain text, one work item per line)
    #[arg(long)]
    pub scope: PathBuf,

    /// Work-scope and pricing catalog (TOML)
    #[arg(long)]
    pub catalog: PathBuf,

    /// Pricing catalog overriding the main catalog's price sections (TOML)
    #[arg(long)]
    pub pricing: Option<PathBuf>,

    /// External task plan with durations and dependencies (TOML)
    #[arg(long)]
    pub plan: Option<PathBuf>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// OCR fragments file (JSON, one entry per source image)
    #[arg(long)]
    pub fragments: PathBuf,
}
