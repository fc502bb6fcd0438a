//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tarmac: clean airline booking exports and append them to MySQL.
///
/// Without a subcommand, runs the ingest: read the dataset, clean it and
/// append it to the configured table.
#[derive(Parser)]
#[command(name = "tarmac")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (default: $TARMAC_CONFIG, then tarmac.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub ingest: IngestArgs,
}

/// Options for the default ingest run.
#[derive(Args, Debug, Clone, Default)]
pub struct IngestArgs {
    /// Clean the dataset without writing to MySQL
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the airline cache from the configured JSON source
    RefreshAirlines,
}
