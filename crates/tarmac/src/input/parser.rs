//! CSV reader for booking datasets.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, TarmacError};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Reads a delimited file into a [`DataTable`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| TarmacError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_bytes(&contents)?;

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            table.row_count(),
            table.column_count(),
        );

        tracing::info!(
            file = %metadata.file,
            rows = metadata.row_count,
            columns = metadata.column_count,
            hash = %metadata.hash,
            "Loaded dataset"
        );

        Ok((table, metadata))
    }

    /// Parse CSV bytes with a header row.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(TarmacError::EmptyData("No columns found".to_string()));
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(TarmacError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b" Booking Date ,Pax Name,Airline\n2023-01-05,MR John,Indigo\n01/06/2023,Jane,Delta";
        let table = parser.parse_bytes(data).unwrap();

        // Header text is left raw; normalization happens in the pipeline.
        assert_eq!(table.headers, vec![" Booking Date ", "Pax Name", "Airline"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 1), Some("MR John"));
        assert_eq!(table.get(1, 2), Some("Delta"));
    }

    #[test]
    fn test_ragged_rows_are_padded_and_truncated() {
        let parser = Parser::new();
        let data = b"a,b,c\n1,2\n4,5,6,7";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["4", "5", "6"]);
    }

    #[test]
    fn test_header_only_is_empty_data() {
        let parser = Parser::new();
        let err = parser.parse_bytes(b"a,b,c\n").unwrap_err();
        assert!(matches!(err, TarmacError::EmptyData(_)));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: b';',
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"a;b\n1;2").unwrap();
        assert_eq!(table.get(0, 1), Some("2"));
    }
}
