//! Fuzz target for airline resolution.
//!
//! The resolver must never panic, and must return either the input or a
//! capitalized vocabulary entry.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tarmac::normalize::capitalize;
use tarmac::vocabulary::{AirlineResolver, Vocabulary};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    vocabulary: Vec<&'a str>,
    name: &'a str,
    threshold: u8,
}

fuzz_target!(|input: Input| {
    if input.vocabulary.len() > 64 || input.name.len() > 256 {
        return;
    }

    let vocab = Vocabulary::new(&input.vocabulary);
    let threshold = f64::from(input.threshold) / 255.0;
    let resolved = AirlineResolver::new(&vocab)
        .with_threshold(threshold)
        .resolve(input.name);

    assert!(resolved == input.name || vocab.iter().any(|entry| capitalize(entry) == resolved));
});
