//! Main Tarmac struct and public API.

use serde::{Deserialize, Serialize};

use crate::config::TarmacConfig;
use crate::error::Result;
use crate::input::{DataTable, Parser, SourceMetadata};
use crate::sink::{Sink, SinkTable};
use crate::transform::{TransformPipeline, TransformResult};
use crate::vocabulary::AirlineCache;

/// Cleaned dataset ready to be appended, with how it got that way.
#[derive(Debug, Clone)]
pub struct PreparedLoad {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The table after every cleaning stage.
    pub table: DataTable,
    /// Typed rows as they will be bound into the sink.
    pub records: SinkTable,
    /// What each stage changed.
    pub transform: TransformResult,
}

/// Result of a completed ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// What each stage changed.
    pub transform: TransformResult,
    /// Table the rows were appended to.
    pub table_name: String,
    /// Rows the sink accepted.
    pub rows_written: usize,
}

/// The ingest engine: reads the dataset, cleans it and hands it to a sink.
pub struct Tarmac {
    config: TarmacConfig,
    parser: Parser,
    pipeline: TransformPipeline,
    cache: AirlineCache,
}

impl Tarmac {
    /// Create an engine from validated configuration.
    pub fn new(config: TarmacConfig) -> Result<Self> {
        config.validate()?;
        let pipeline = TransformPipeline::new(config.pipeline.clone())?;
        let cache = AirlineCache::new(&config.paths.airlines_cache_path);

        Ok(Self {
            config,
            parser: Parser::new(),
            pipeline,
            cache,
        })
    }

    pub fn config(&self) -> &TarmacConfig {
        &self.config
    }

    /// Read, clean and type the dataset without touching the sink.
    pub fn prepare(&self) -> Result<PreparedLoad> {
        let (raw, source) = self.parser.parse_file(&self.config.paths.dataset_path)?;
        let vocabulary = self.cache.load()?;

        let output = self.pipeline.run(&raw, &vocabulary)?;
        let records = SinkTable::from_table(&output.table, &self.config.pipeline.date_columns)?;

        tracing::info!(
            rows = records.row_count(),
            values_changed = output.report.values_changed,
            corrected = output.report.airlines.corrected,
            unresolved = output.report.airlines.unresolved,
            "Prepared dataset"
        );

        Ok(PreparedLoad {
            source,
            table: output.table,
            records,
            transform: output.report,
        })
    }

    /// Append a prepared dataset to `sink`.
    pub fn load(&self, prepared: PreparedLoad, sink: &mut dyn Sink) -> Result<IngestReport> {
        let table_name = self.config.mysql.table_name.clone();
        let rows_written = sink.append(
            &table_name,
            &prepared.records,
            self.config.pipeline.batch_size,
        )?;

        Ok(IngestReport {
            source: prepared.source,
            transform: prepared.transform,
            table_name,
            rows_written,
        })
    }

    /// Prepare the dataset and append it to `sink`.
    ///
    /// Nothing is written when any earlier stage fails.
    pub fn ingest(&self, sink: &mut dyn Sink) -> Result<IngestReport> {
        let prepared = self.prepare()?;
        self.load(prepared, sink)
    }

    /// Rebuild the airline cache from the configured source document.
    pub fn refresh_airlines(&self) -> Result<Vec<String>> {
        self.cache.rebuild(&self.config.paths.airlines_source_path)
    }
}
