//! Fuzz target for CSV parsing plus the cleaning pipeline.
//!
//! Malformed input may be rejected but must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tarmac::input::Parser;
use tarmac::{PipelineConfig, TransformPipeline, Vocabulary};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(table) = Parser::new().parse_bytes(data) else {
        return;
    };

    let vocab = Vocabulary::new(["air india", "indigo", "spicejet"]);
    if let Ok(pipeline) = TransformPipeline::new(PipelineConfig::default()) {
        let _ = pipeline.run(&table, &vocab);
    }
});
