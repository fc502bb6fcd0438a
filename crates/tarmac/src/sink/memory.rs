//! In-memory sink for tests and dry runs.

use crate::error::{Result, TarmacError};

use super::record::{Cell, SinkTable};
use super::Sink;

/// One batch as it was handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBatch {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Sink that keeps every appended batch in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Vec<RecordedBatch>,
    failure: Option<String>,
}

impl MemorySink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every append fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            batches: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// Batches in the order they were appended.
    pub fn batches(&self) -> &[RecordedBatch] {
        &self.batches
    }

    /// All rows across batches.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<Cell>> {
        self.batches.iter().flat_map(|b| b.rows.iter())
    }
}

impl Sink for MemorySink {
    fn append(&mut self, table_name: &str, records: &SinkTable, batch_size: usize) -> Result<usize> {
        if let Some(ref message) = self.failure {
            return Err(TarmacError::SinkWrite(message.clone()));
        }

        for chunk in records.rows.chunks(batch_size.max(1)) {
            self.batches.push(RecordedBatch {
                table_name: table_name.to_string(),
                columns: records.columns.clone(),
                rows: chunk.to_vec(),
            });
        }

        Ok(records.row_count())
    }
}
