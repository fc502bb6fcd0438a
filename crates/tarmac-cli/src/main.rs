//! Tarmac CLI - clean airline booking exports and load them into MySQL.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        None => commands::ingest::run(cli.config, cli.ingest),
        Some(Commands::RefreshAirlines) => commands::refresh::run(cli.config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
