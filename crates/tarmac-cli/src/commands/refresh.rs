//! Refresh command - rebuild the airline cache.

use std::path::PathBuf;

use colored::Colorize;
use tarmac::Tarmac;

use super::load_config;

pub fn run(config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let source = config.paths.airlines_source_path.clone();
    let cache = config.paths.airlines_cache_path.clone();

    let tarmac = Tarmac::new(config)?;
    let names = tarmac.refresh_airlines()?;

    println!(
        "{} {} airline(s) from {} into {}",
        "Cached".green().bold(),
        names.len().to_string().white().bold(),
        source.display(),
        cache.display()
    );

    Ok(())
}
