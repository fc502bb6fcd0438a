//! Mixed-format date parsing.
//!
//! Values are tried against an ordered list of formats. Ambiguous numeric
//! dates (`03/04/2023`) are read month-first unless day-first is requested.
//! Parsed years outside `1000..=9999` are rejected so that a short date such
//! as `5-1-23` is never taken as the year 5.
//! Any date format may carry a trailing time and UTC offset; both are dropped.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

/// Format the cleaning pass renders dates in.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Format dates are written to the sink in.
pub const SINK_FORMAT: &str = "%Y-%m-%d";

const YEAR_FIRST: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

// Two-digit-year variants come first: `%Y` would happily accept "23".
const MONTH_FIRST: &[&str] = &[
    "%m/%d/%y", "%m/%d/%Y", "%m-%d-%y", "%m-%d-%Y", "%m.%d.%y", "%m.%d.%Y",
];

const DAY_FIRST: &[&str] = &[
    "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%d.%m.%y", "%d.%m.%Y",
];

// `%B` also accepts the three-letter abbreviation when parsing.
const MONTH_NAME: &[&str] = &[
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%B-%y",
    "%d-%B-%Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Time suffixes appended to every date format.
const TIMES: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Offset suffixes appended to every date-time format.
const OFFSETS: &[&str] = &["%z", "%:z"];

/// Every format the normalizer tries for one reading order.
struct FormatTable {
    dates: Vec<&'static str>,
    date_times: Vec<String>,
    zoned: Vec<String>,
}

impl FormatTable {
    fn new(day_first: bool) -> Self {
        let (first, second) = if day_first {
            (DAY_FIRST, MONTH_FIRST)
        } else {
            (MONTH_FIRST, DAY_FIRST)
        };

        let dates: Vec<&'static str> = YEAR_FIRST
            .iter()
            .chain(first)
            .chain(second)
            .chain(MONTH_NAME)
            .copied()
            .collect();

        let mut date_times: Vec<String> = dates
            .iter()
            .flat_map(|date| TIMES.iter().map(move |time| format!("{} {}", date, time)))
            .collect();
        date_times.extend(TIMES.iter().map(|time| format!("%Y-%m-%dT{}", time)));

        let zoned = date_times
            .iter()
            .flat_map(|fmt| OFFSETS.iter().map(move |offset| format!("{} {}", fmt, offset)))
            .collect();

        Self {
            dates,
            date_times,
            zoned,
        }
    }
}

static MONTH_FIRST_TABLE: Lazy<FormatTable> = Lazy::new(|| FormatTable::new(false));
static DAY_FIRST_TABLE: Lazy<FormatTable> = Lazy::new(|| FormatTable::new(true));

/// Parses heterogeneous date strings into calendar dates.
#[derive(Debug, Clone, Default)]
pub struct DateNormalizer {
    day_first: bool,
}

impl DateNormalizer {
    /// Create a normalizer that reads ambiguous dates month-first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose day-first or month-first reading of ambiguous dates.
    pub fn with_day_first(mut self, day_first: bool) -> Self {
        self.day_first = day_first;
        self
    }

    /// Parse a value with every supported format, in preference order.
    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        let table: &FormatTable = if self.day_first {
            &DAY_FIRST_TABLE
        } else {
            &MONTH_FIRST_TABLE
        };

        table
            .dates
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok().filter(plausible))
            .or_else(|| {
                table.date_times.iter().find_map(|fmt| {
                    NaiveDateTime::parse_from_str(value, fmt)
                        .ok()
                        .map(|dt| dt.date())
                        .filter(plausible)
                })
            })
            .or_else(|| {
                // Offsets are dropped: the date is taken as written.
                table.zoned.iter().find_map(|fmt| {
                    DateTime::parse_from_str(value, fmt)
                        .ok()
                        .map(|dt| dt.date_naive())
                        .filter(plausible)
                })
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|dt| dt.date_naive())
                    .filter(plausible)
            })
    }

    /// Parse and render as `DD-MM-YYYY`.
    pub fn to_display(&self, value: &str) -> Option<String> {
        self.parse(value)
            .map(|date| date.format(DISPLAY_FORMAT).to_string())
    }
}

/// Read back a value rendered with [`DISPLAY_FORMAT`].
pub fn parse_display(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DISPLAY_FORMAT).ok()
}

fn plausible(date: &NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}
