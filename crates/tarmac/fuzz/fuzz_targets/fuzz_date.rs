//! Fuzz target for date normalization.
//!
//! Any value the normalizer accepts must render to a `DD-MM-YYYY` string
//! that reads back to the same date.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tarmac::normalize::{DateNormalizer, parse_display};

fuzz_target!(|data: (bool, &str)| {
    let (day_first, value) = data;
    if value.len() > 256 {
        return;
    }

    let normalizer = DateNormalizer::new().with_day_first(day_first);
    if let Some(date) = normalizer.parse(value) {
        let rendered = normalizer.to_display(value).unwrap();
        assert_eq!(parse_display(&rendered), Some(date));
    }
});
