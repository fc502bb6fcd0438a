//! Typed rows handed to a sink.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TarmacError};
use crate::input::DataTable;
use crate::normalize::{SINK_FORMAT, parse_display};

/// A single value bound into an INSERT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Date(NaiveDate),
    Null,
}

impl Cell {
    /// Value as bound into SQL; dates become `YYYY-MM-DD`.
    pub fn to_sql_text(&self) -> Option<String> {
        match self {
            Cell::Text(text) => Some(text.clone()),
            Cell::Date(date) => Some(date.format(SINK_FORMAT).to_string()),
            Cell::Null => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Date(date) => write!(f, "{}", date.format(SINK_FORMAT)),
            Cell::Null => f.write_str("NULL"),
        }
    }
}

/// Ordered columns and typed rows ready for a bulk insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SinkTable {
    /// Convert a cleaned table. Date columns must hold `DD-MM-YYYY` values,
    /// as produced by the pipeline; they are read back with that exact format.
    pub fn from_table<S: AsRef<str>>(table: &DataTable, date_columns: &[S]) -> Result<Self> {
        let is_date: Vec<bool> = table
            .headers
            .iter()
            .map(|h| date_columns.iter().any(|d| d.as_ref() == h))
            .collect();

        let mut rows = Vec::with_capacity(table.row_count());
        for (row_idx, row) in table.rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            for (col_idx, value) in row.iter().enumerate() {
                let cell = if DataTable::is_unset(value) {
                    Cell::Null
                } else if is_date[col_idx] {
                    let date = parse_display(value).ok_or_else(|| TarmacError::DateParse {
                        column: table.headers[col_idx].clone(),
                        row: row_idx,
                        value: value.clone(),
                    })?;
                    Cell::Date(date)
                } else {
                    Cell::Text(value.clone())
                };
                cells.push(cell);
            }
            rows.push(cells);
        }

        Ok(Self {
            columns: table.headers.clone(),
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
