//! Column header normalization.

use indexmap::IndexSet;

use crate::error::{Result, TarmacError};

/// Trim a header and join its internal whitespace runs with `_`.
///
/// ```
/// use tarmac::normalize::normalize_header;
///
/// assert_eq!(normalize_header("  Booking   Date "), "Booking_Date");
/// assert_eq!(normalize_header("Booking_Date"), "Booking_Date");
/// ```
pub fn normalize_header(header: &str) -> String {
    header.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Normalize every header, rejecting names that collide afterwards.
pub fn normalize_headers(headers: &[String]) -> Result<Vec<String>> {
    let mut seen = IndexSet::with_capacity(headers.len());
    for header in headers {
        let normalized = normalize_header(header);
        if !seen.insert(normalized.clone()) {
            return Err(TarmacError::DuplicateColumn(normalized));
        }
    }
    Ok(seen.into_iter().collect())
}
