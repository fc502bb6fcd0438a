//! Stages of the cleaning pipeline and the report they produce.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One cleaning pass, listed in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Trim headers and replace inner whitespace with `_`.
    HeaderNormalization,
    /// Parse date columns and render them `DD-MM-YYYY`.
    DateNormalization,
    /// Strip honorifics from passenger names.
    PrefixRemoval,
    /// Collapse `X/X` airline values.
    DuplicateCollapse,
    /// Capitalize every non-date column.
    Capitalization,
    /// Correct misspelled airline names.
    AirlineResolution,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::HeaderNormalization => "header_normalization",
            Stage::DateNormalization => "date_normalization",
            Stage::PrefixRemoval => "prefix_removal",
            Stage::DuplicateCollapse => "duplicate_collapse",
            Stage::Capitalization => "capitalization",
            Stage::AirlineResolution => "airline_resolution",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the pipeline over a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformResult {
    /// Number of stage applications (a stage run on two columns counts twice).
    pub operations_applied: usize,

    /// Total number of cell values changed.
    pub values_changed: usize,

    /// Detailed changes for each stage application.
    pub changes: Vec<TransformChange>,

    /// How airline values related to the vocabulary.
    pub airlines: AirlineSummary,
}

/// A single stage applied to a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformChange {
    /// Stage that ran.
    pub stage: Stage,

    /// Description of the change.
    pub description: String,

    /// Column affected (empty for header normalization).
    pub column: String,

    /// Number of values changed.
    pub values_changed: usize,

    /// Per-row audit information.
    pub row_audits: Vec<RowAudit>,
}

/// Audit information for a single cell change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAudit {
    /// Row index (0-based, excluding header).
    pub row: usize,

    /// Column that was changed.
    pub column: String,

    /// Value before the stage ran.
    pub original_value: String,

    /// Value after the stage ran.
    pub new_value: String,
}

/// Per-row outcome counts of airline resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineSummary {
    pub exact: usize,
    pub corrected: usize,
    pub unresolved: usize,
    /// Distinct unresolved values, in first-seen order.
    pub unresolved_values: Vec<String>,
}

impl TransformResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change to the result.
    pub fn add_change(&mut self, change: TransformChange) {
        self.operations_applied += 1;
        self.values_changed += change.values_changed;
        self.changes.push(change);
    }

    /// Changes recorded for one stage.
    pub fn changes_for(&self, stage: Stage) -> impl Iterator<Item = &TransformChange> {
        self.changes.iter().filter(move |c| c.stage == stage)
    }

    /// Values changed by one stage across all columns.
    pub fn values_changed_by(&self, stage: Stage) -> usize {
        self.changes_for(stage).map(|c| c.values_changed).sum()
    }
}

impl TransformChange {
    /// Start an empty change record for `stage` on `column`.
    pub fn new(stage: Stage, column: impl Into<String>) -> Self {
        Self {
            stage,
            description: String::new(),
            column: column.into(),
            values_changed: 0,
            row_audits: Vec::new(),
        }
    }

    /// Record one changed cell.
    pub fn record(&mut self, row: usize, original_value: &str, new_value: &str) {
        self.values_changed += 1;
        self.row_audits.push(RowAudit {
            row,
            column: self.column.clone(),
            original_value: original_value.to_string(),
            new_value: new_value.to_string(),
        });
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
