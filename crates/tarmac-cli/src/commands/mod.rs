//! CLI command implementations.

pub mod ingest;
pub mod refresh;

use std::path::PathBuf;

use tarmac::TarmacConfig;

/// Load configuration from `--config`, else from the environment default.
pub fn load_config(path: Option<PathBuf>) -> tarmac::Result<TarmacConfig> {
    match path {
        Some(path) => TarmacConfig::load(path),
        None => TarmacConfig::from_env(),
    }
}
