//! Tarmac: cleaning and loading of airline booking exports.
//!
//! Tarmac reads a CSV of bookings, normalizes headers, dates and passenger
//! names, corrects misspelled airline names against a cached vocabulary and
//! appends the result to a MySQL table.
//!
//! # Core Principles
//!
//! - **All or nothing**: a failing stage aborts the run before the sink is touched
//! - **Append only**: rows are inserted, never updated or deleted
//! - **Traceable**: every changed cell is recorded in the transform report
//!
//! # Example
//!
//! ```no_run
//! use tarmac::{MemorySink, Tarmac, TarmacConfig};
//!
//! let config = TarmacConfig::load("tarmac.toml").unwrap();
//! let tarmac = Tarmac::new(config).unwrap();
//!
//! let mut sink = MemorySink::new();
//! let report = tarmac.ingest(&mut sink).unwrap();
//! println!("Rows written: {}", report.rows_written);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod normalize;
pub mod sink;
pub mod transform;
pub mod vocabulary;

mod tarmac;

pub use crate::tarmac::{IngestReport, PreparedLoad, Tarmac};
pub use config::{PipelineConfig, SinkConfig, TarmacConfig};
pub use error::{Result, TarmacError};
pub use input::{DataTable, SourceMetadata};
pub use sink::{Cell, MemorySink, MySqlSink, Sink, SinkTable};
pub use transform::{TransformPipeline, TransformResult};
pub use vocabulary::{AirlineCache, AirlineResolver, Resolution, Vocabulary, resolve};
