//! Run configuration loaded once from a TOML file.
//!
//! ```toml
//! [paths]
//! airlines_cache_path = "data/airlines.json"
//! airlines_source_path = "data/airlines_source.json"
//! dataset_path = "data/bookings.csv"
//!
//! [mysql]
//! host = "localhost"
//! user = "etl"
//! password = "secret"
//! database = "travel"
//! table_name = "bookings"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TarmacError};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "TARMAC_CONFIG";

/// Environment variable that overrides `mysql.password`.
pub const PASSWORD_ENV: &str = "TARMAC_MYSQL_PASSWORD";

/// Configuration file used when `TARMAC_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "tarmac.toml";

/// Default rows per INSERT statement.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default minimum similarity for a fuzzy airline match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TarmacConfig {
    /// File locations.
    pub paths: PathsConfig,
    /// Relational sink credentials.
    pub mysql: SinkConfig,
    /// Pipeline tuning.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// File locations used by a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Serialized airline vocabulary.
    pub airlines_cache_path: PathBuf,
    /// JSON document the vocabulary is rebuilt from.
    pub airlines_source_path: PathBuf,
    /// CSV dataset to ingest.
    pub dataset_path: PathBuf,
}

/// Connection details for the MySQL sink.
#[derive(Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Host name, optionally with a `:port` suffix.
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Target table rows are appended to.
    pub table_name: String,
}

impl std::fmt::Debug for SinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl SinkConfig {
    /// Split `host` into host name and port (default 3306).
    ///
    /// IPv6 literals take a port only in brackets (`[::1]:3307`); an
    /// unbracketed value with several colons is a bare IPv6 host.
    pub fn host_and_port(&self) -> Result<(&str, u16)> {
        let invalid = || {
            TarmacError::Config(format!("mysql.host has an invalid port: '{}'", self.host))
        };

        if let Some(rest) = self.host.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| {
                TarmacError::Config(format!("mysql.host has an unclosed '[': '{}'", self.host))
            })?;
            return match tail {
                "" => Ok((host, 3306)),
                _ => {
                    let port = tail.strip_prefix(':').ok_or_else(invalid)?;
                    Ok((host, port.parse::<u16>().map_err(|_| invalid())?))
                }
            };
        }

        if self.host.matches(':').count() > 1 {
            return Ok((self.host.as_str(), 3306));
        }

        match self.host.rsplit_once(':') {
            Some((host, port)) => Ok((host, port.parse::<u16>().map_err(|_| invalid())?)),
            None => Ok((self.host.as_str(), 3306)),
        }
    }
}

/// Column names and tuning knobs for the transformation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Columns parsed as dates (post header normalization names).
    pub date_columns: Vec<String>,
    /// Column holding passenger names.
    pub passenger_column: String,
    /// Column holding airline names.
    pub airline_column: String,
    /// Honorific prefixes stripped from passenger names.
    pub honorifics: Vec<String>,
    /// Minimum similarity for a fuzzy airline correction.
    pub similarity_threshold: f64,
    /// Read ambiguous numeric dates as day-first.
    pub day_first: bool,
    /// Rows per INSERT statement.
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            date_columns: vec!["Booking_Date".to_string(), "Travel_Date".to_string()],
            passenger_column: "Pax_Name".to_string(),
            airline_column: "Airline".to_string(),
            honorifics: vec!["MR".to_string(), "MRS".to_string()],
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            day_first: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Check that the pipeline settings are usable.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(TarmacError::Config(format!(
                "pipeline.similarity_threshold must be within 0.0..=1.0, got {}",
                self.similarity_threshold
            )));
        }
        if self.batch_size == 0 {
            return Err(TarmacError::Config(
                "pipeline.batch_size must be greater than zero".to_string(),
            ));
        }
        require("pipeline.passenger_column", &self.passenger_column)?;
        require("pipeline.airline_column", &self.airline_column)?;
        for column in &self.date_columns {
            require("pipeline.date_columns", column)?;
        }
        for honorific in &self.honorifics {
            require("pipeline.honorifics", honorific)?;
        }
        Ok(())
    }

    /// Whether `column` is one of the configured date columns.
    pub fn is_date_column(&self, column: &str) -> bool {
        self.date_columns.iter().any(|c| c == column)
    }
}

impl TarmacConfig {
    /// Load configuration from the path in `TARMAC_CONFIG`, or `tarmac.toml`.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load(path)
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TarmacError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        let mut config = Self::from_toml(&content)?;
        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            config.mysql.password = password;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| TarmacError::Config(e.to_string()))
    }

    /// Check every required entry before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        require_path("paths.airlines_cache_path", &self.paths.airlines_cache_path)?;
        require_path("paths.airlines_source_path", &self.paths.airlines_source_path)?;
        require_path("paths.dataset_path", &self.paths.dataset_path)?;

        require("mysql.host", &self.mysql.host)?;
        require("mysql.user", &self.mysql.user)?;
        require("mysql.database", &self.mysql.database)?;
        require("mysql.table_name", &self.mysql.table_name)?;
        self.mysql.host_and_port()?;

        self.pipeline.validate()
    }
}

fn require(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TarmacError::Config(format!("'{}' must not be empty", key)));
    }
    Ok(())
}

fn require_path(key: &str, value: &Path) -> Result<()> {
    if value.as_os_str().is_empty() {
        return Err(TarmacError::Config(format!("'{}' must not be empty", key)));
    }
    Ok(())
}
