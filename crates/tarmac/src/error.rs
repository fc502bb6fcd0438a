//! Error types for the tarmac library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tarmac operations.
#[derive(Debug, Error)]
pub enum TarmacError {
    /// Missing or malformed configuration entry.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column the pipeline addresses is not present.
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// Two headers collapse to the same name after normalization.
    #[error("Duplicate column '{0}' after header normalization")]
    DuplicateColumn(String),

    /// The airline cache artifact is missing or corrupt.
    #[error("Airline cache unavailable at '{path}': {reason}")]
    CacheUnavailable { path: PathBuf, reason: String },

    /// The airline source document could not be read.
    #[error("Airline source unavailable at '{path}': {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The airline source document is not the expected JSON shape.
    #[error("Airline source '{path}' is malformed: {message}")]
    SourceMalformed { path: PathBuf, message: String },

    /// A date cell matched none of the supported formats.
    #[error("Unparseable date in column '{column}', row {row}: '{value}'")]
    DateParse {
        column: String,
        row: usize,
        value: String,
    },

    /// Bulk insert into the relational sink failed.
    #[error("Sink write failed: {0}")]
    SinkWrite(String),
}

impl From<sqlx::Error> for TarmacError {
    fn from(err: sqlx::Error) -> Self {
        TarmacError::SinkWrite(err.to_string())
    }
}

/// Result type alias for tarmac operations.
pub type Result<T> = std::result::Result<T, TarmacError>;
