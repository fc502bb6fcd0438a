//! Cleaning pipeline applied to booking tables.

mod operations;
mod pipeline;

pub use operations::{AirlineSummary, RowAudit, Stage, TransformChange, TransformResult};
pub use pipeline::{PipelineOutput, TransformPipeline};
