//! Integration tests for Tarmac.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use tarmac::{AirlineCache, Cell, MemorySink, Tarmac, TarmacConfig, TarmacError};

const AIRLINES: &str = r#"{"airlines": ["Air India", "IndiGo", "SpiceJet", "Vistara"]}"#;

const BOOKINGS: &str = "Pax Name,Airline,Booking  Date,Travel Date,Class\n\
                        MR. john doe,INDIGO/INDIGO,2023-01-05,2023-02-10,economy\n\
                        mrs jane roe,Spicejett,01/15/2023,15-02-2023,business\n\
                        Ravi Kumar,Zzzzzz Air,2023/03/03,,economy\n";

/// A scratch directory holding a dataset, an airline source and a config.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(bookings: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("bookings.csv"), bookings).expect("Failed to write dataset");
        fs::write(dir.path().join("airlines_source.json"), AIRLINES)
            .expect("Failed to write airline source");
        Self { dir }
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    fn config(&self, batch_size: usize) -> TarmacConfig {
        let toml = format!(
            r#"
[paths]
airlines_cache_path = '{}'
airlines_source_path = '{}'
dataset_path = '{}'

[mysql]
host = "localhost:3307"
user = "etl"
password = "secret"
database = "travel"
table_name = "bookings"

[pipeline]
batch_size = {}
"#,
            self.path("airlines.json"),
            self.path("airlines_source.json"),
            self.path("bookings.csv"),
            batch_size
        );
        TarmacConfig::from_toml(&toml).expect("Invalid test config")
    }

    fn tarmac(&self, batch_size: usize) -> Tarmac {
        Tarmac::new(self.config(batch_size)).expect("Failed to create engine")
    }
}

fn date(y: i32, m: u32, d: u32) -> Cell {
    Cell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

// =============================================================================
// End-to-End Ingest
// =============================================================================

#[test]
fn test_ingest_cleans_and_appends() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(1000);
    tarmac.refresh_airlines().expect("Refresh failed");

    let mut sink = MemorySink::new();
    let report = tarmac.ingest(&mut sink).expect("Ingest failed");

    assert_eq!(report.rows_written, 3);
    assert_eq!(report.table_name, "bookings");
    assert_eq!(report.source.row_count, 3);
    assert_eq!(report.transform.airlines.exact, 1);
    assert_eq!(report.transform.airlines.corrected, 1);
    assert_eq!(report.transform.airlines.unresolved, 1);
    assert_eq!(report.transform.airlines.unresolved_values, vec!["Zzzzzz air"]);

    let batch = &sink.batches()[0];
    assert_eq!(batch.table_name, "bookings");
    assert_eq!(
        batch.columns,
        vec!["Pax_Name", "Airline", "Booking_Date", "Travel_Date", "Class"]
    );

    let rows: Vec<_> = sink.rows().cloned().collect();
    assert_eq!(
        rows[0],
        vec![text("John doe"), text("Indigo"), date(2023, 1, 5), date(2023, 2, 10), text("Economy")]
    );
    assert_eq!(
        rows[1],
        vec![text("Jane roe"), text("Spicejet"), date(2023, 1, 15), date(2023, 2, 15), text("Business")]
    );
    assert_eq!(
        rows[2],
        vec![text("Ravi kumar"), text("Zzzzzz air"), date(2023, 3, 3), Cell::Null, text("Economy")]
    );
}

#[test]
fn test_dates_bound_year_first() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(1000);
    tarmac.refresh_airlines().unwrap();

    let prepared = tarmac.prepare().unwrap();

    // The cleaned table carries display dates; the sink receives ISO dates.
    assert_eq!(prepared.table.get(0, 2), Some("05-01-2023"));
    let bound = prepared.records.cell(0, "Booking_Date").unwrap().to_sql_text();
    assert_eq!(bound.as_deref(), Some("2023-01-05"));
}

#[test]
fn test_batches_respect_batch_size() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(2);
    tarmac.refresh_airlines().unwrap();

    let mut sink = MemorySink::new();
    let report = tarmac.ingest(&mut sink).unwrap();

    assert_eq!(report.rows_written, 3);
    assert_eq!(sink.batches().len(), 2);
    assert_eq!(sink.batches()[0].rows.len(), 2);
    assert_eq!(sink.batches()[1].rows.len(), 1);
}

// =============================================================================
// Airline Cache
// =============================================================================

#[test]
fn test_refresh_replaces_cache() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(1000);

    let names = tarmac.refresh_airlines().unwrap();
    assert_eq!(names, vec!["Air India", "IndiGo", "SpiceJet", "Vistara"]);

    let cache = AirlineCache::new(fixture.path("airlines.json"));
    let vocab = cache.load().unwrap();
    assert_eq!(vocab.len(), 4);
    assert!(vocab.contains("spicejet"));

    fs::write(fixture.path("airlines_source.json"), r#"{"airlines": ["Akasa Air"]}"#).unwrap();
    tarmac.refresh_airlines().unwrap();

    let vocab = cache.load().unwrap();
    assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["akasa air"]);
}

#[test]
fn test_missing_cache_aborts_before_sink() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(1000);

    let mut sink = MemorySink::new();
    let err = tarmac.ingest(&mut sink).unwrap_err();

    assert!(matches!(err, TarmacError::CacheUnavailable { .. }));
    assert!(sink.batches().is_empty());
}

#[test]
fn test_malformed_source_keeps_previous_cache() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(1000);
    tarmac.refresh_airlines().unwrap();

    fs::write(fixture.path("airlines_source.json"), r#"{"carriers": []}"#).unwrap();
    let err = tarmac.refresh_airlines().unwrap_err();
    assert!(matches!(err, TarmacError::SourceMalformed { .. }));

    let vocab = AirlineCache::new(fixture.path("airlines.json")).load().unwrap();
    assert_eq!(vocab.len(), 4);
}

#[test]
fn test_missing_source() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(1000);
    fs::remove_file(fixture.path("airlines_source.json")).unwrap();

    let err = tarmac.refresh_airlines().unwrap_err();
    assert!(matches!(err, TarmacError::SourceUnavailable { .. }));
    assert!(!Path::new(&fixture.path("airlines.json")).exists());
}

// =============================================================================
// Failure Handling
// =============================================================================

#[test]
fn test_bad_date_writes_nothing() {
    let bookings = "Pax Name,Airline,Booking Date,Travel Date\n\
                    MR. john doe,Indigo,2023-01-05,2023-02-10\n\
                    mrs jane roe,Vistara,not a date,2023-02-11\n";
    let fixture = Fixture::new(bookings);
    let tarmac = fixture.tarmac(1000);
    tarmac.refresh_airlines().unwrap();

    let mut sink = MemorySink::new();
    let err = tarmac.ingest(&mut sink).unwrap_err();

    match err {
        TarmacError::DateParse { column, row, value } => {
            assert_eq!(column, "Booking_Date");
            assert_eq!(row, 1);
            assert_eq!(value, "not a date");
        }
        other => panic!("Expected DateParse, got {:?}", other),
    }
    assert!(sink.batches().is_empty());
}

#[test]
fn test_sink_failure_propagates() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(1000);
    tarmac.refresh_airlines().unwrap();

    let mut sink = MemorySink::failing("connection reset");
    let err = tarmac.ingest(&mut sink).unwrap_err();

    assert!(matches!(err, TarmacError::SinkWrite(ref m) if m == "connection reset"));
}

#[test]
fn test_missing_dataset() {
    let fixture = Fixture::new(BOOKINGS);
    let tarmac = fixture.tarmac(1000);
    tarmac.refresh_airlines().unwrap();
    fs::remove_file(fixture.path("bookings.csv")).unwrap();

    let err = tarmac.prepare().unwrap_err();
    assert!(matches!(err, TarmacError::Io { .. }));
}

#[test]
fn test_missing_required_column() {
    let fixture = Fixture::new("Passenger,Airline,Booking Date,Travel Date\nA,Indigo,2023-01-01,\n");
    let tarmac = fixture.tarmac(1000);
    tarmac.refresh_airlines().unwrap();

    let err = tarmac.prepare().unwrap_err();
    assert!(matches!(err, TarmacError::MissingColumn(ref c) if c == "Pax_Name"));
}

#[test]
fn test_invalid_config_rejected() {
    let fixture = Fixture::new(BOOKINGS);
    let mut config = fixture.config(1000);
    config.mysql.table_name = String::new();

    assert!(matches!(Tarmac::new(config), Err(TarmacError::Config(_))));
}
