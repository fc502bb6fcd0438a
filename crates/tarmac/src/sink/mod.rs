//! Destinations for cleaned rows.

mod memory;
mod mysql;
mod record;

pub use memory::{MemorySink, RecordedBatch};
pub use mysql::MySqlSink;
pub use record::{Cell, SinkTable};

use crate::error::Result;

/// Append-only bulk writer.
///
/// Implementations write `records` to `table_name` in batches of at most
/// `batch_size` rows and never delete or update existing rows.
pub trait Sink {
    /// Append every row. Returns the number of rows written.
    fn append(&mut self, table_name: &str, records: &SinkTable, batch_size: usize) -> Result<usize>;
}
