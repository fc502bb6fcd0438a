//! MySQL sink built on sqlx.

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::{MySql, QueryBuilder};
use tokio::runtime::{Builder, Runtime};

use crate::config::SinkConfig;
use crate::error::{Result, TarmacError};

use super::Sink;
use super::record::SinkTable;

/// MySQL rejects prepared statements with more placeholders than this.
const MAX_PLACEHOLDERS: usize = 65_535;

/// Appends rows to a MySQL table with multi-row INSERT statements.
///
/// All batches of one append share a transaction. Failures are not retried:
/// appends are not idempotent.
pub struct MySqlSink {
    runtime: Runtime,
    pool: MySqlPool,
}

impl MySqlSink {
    /// Connect using the configured credentials.
    pub fn connect(config: &SinkConfig) -> Result<Self> {
        let (host, port) = config.host_and_port()?;
        let options = MySqlConnectOptions::new()
            .host(host)
            .port(port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TarmacError::SinkWrite(format!("Failed to start runtime: {}", e)))?;

        let pool = runtime.block_on(
            MySqlPoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_secs(30))
                .connect_with(options),
        )?;

        tracing::info!(host, port, database = %config.database, "Connected to MySQL");

        Ok(Self { runtime, pool })
    }

    /// Close the connection pool.
    pub fn close(self) {
        self.runtime.block_on(self.pool.close());
    }
}

impl Sink for MySqlSink {
    fn append(&mut self, table_name: &str, records: &SinkTable, batch_size: usize) -> Result<usize> {
        self.runtime
            .block_on(insert_batches(&self.pool, table_name, records, batch_size))
    }
}

async fn insert_batches(
    pool: &MySqlPool,
    table_name: &str,
    records: &SinkTable,
    batch_size: usize,
) -> Result<usize> {
    if records.rows.is_empty() {
        return Ok(0);
    }

    let rows_per_statement = rows_per_statement(batch_size, records.columns.len());
    let prefix = insert_prefix(table_name, &records.columns);

    let mut tx = pool.begin().await?;
    let mut written = 0;

    for chunk in records.rows.chunks(rows_per_statement) {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(prefix.as_str());
        builder.push_values(chunk, |mut row_builder, row| {
            for cell in row {
                row_builder.push_bind(cell.to_sql_text());
            }
        });

        builder.build().execute(&mut *tx).await?;
        written += chunk.len();
        tracing::debug!(table = table_name, rows = chunk.len(), written, "Inserted batch");
    }

    tx.commit().await?;
    tracing::info!(table = table_name, rows = written, "Appended rows");

    Ok(written)
}

/// `INSERT INTO `table` (`a`, `b`) ` with identifiers quoted.
fn insert_prefix(table_name: &str, columns: &[String]) -> String {
    let columns: Vec<String> = columns.iter().map(|c| quote_identifier(c)).collect();
    format!(
        "INSERT INTO {} ({}) ",
        quote_identifier(table_name),
        columns.join(", ")
    )
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Batch size capped so one statement stays under the placeholder limit.
fn rows_per_statement(batch_size: usize, columns: usize) -> usize {
    let limit = MAX_PLACEHOLDERS / columns.max(1);
    batch_size.clamp(1, limit.max(1))
}
