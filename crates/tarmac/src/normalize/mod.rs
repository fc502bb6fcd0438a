//! Stateless value normalizers used by the transformation pipeline.

mod date;
mod header;
mod text;

pub use date::{DISPLAY_FORMAT, DateNormalizer, SINK_FORMAT, parse_display};
pub use header::{normalize_header, normalize_headers};
pub use text::{PrefixStripper, capitalize, collapse_duplicate};
