//! Transformation pipeline that cleans a booking table.

use std::collections::HashMap;

use crate::config::PipelineConfig;
use crate::error::{Result, TarmacError};
use crate::input::DataTable;
use crate::normalize::{
    DateNormalizer, PrefixStripper, capitalize, collapse_duplicate, normalize_headers,
};
use crate::vocabulary::{AirlineResolver, Resolution, Vocabulary};

use super::operations::{AirlineSummary, Stage, TransformChange, TransformResult};

/// Cleaned table plus what was done to it.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: DataTable,
    pub report: TransformResult,
}

/// Runs every cleaning stage, in order, over a copy of the input.
///
/// Stage order: headers, dates, passenger prefixes, duplicate airline
/// tokens, capitalization, airline resolution. Capitalization must precede
/// resolution because exact vocabulary matches are written back untouched.
pub struct TransformPipeline {
    config: PipelineConfig,
    prefixes: PrefixStripper,
    dates: DateNormalizer,
}

impl TransformPipeline {
    /// Create a pipeline, validating its configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let prefixes = PrefixStripper::new(&config.honorifics)?;
        let dates = DateNormalizer::new().with_day_first(config.day_first);

        Ok(Self {
            config,
            prefixes,
            dates,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clean `input` against `vocabulary`. The input is left untouched.
    pub fn run(&self, input: &DataTable, vocabulary: &Vocabulary) -> Result<PipelineOutput> {
        let mut data = input.clone();
        let mut report = TransformResult::new();

        report.add_change(self.normalize_headers(&mut data)?);

        let passenger = self.require_column(&data, &self.config.passenger_column)?;
        let airline = self.require_column(&data, &self.config.airline_column)?;
        let date_columns = self
            .config
            .date_columns
            .iter()
            .map(|name| self.require_column(&data, name))
            .collect::<Result<Vec<_>>>()?;

        for &col in &date_columns {
            report.add_change(self.normalize_dates(&mut data, col)?);
        }

        let prefixes = &self.prefixes;
        report.add_change(map_column(&mut data, passenger, Stage::PrefixRemoval, |v| {
            prefixes.strip(v).to_string()
        }));

        report.add_change(map_column(&mut data, airline, Stage::DuplicateCollapse, |v| {
            collapse_duplicate(v).to_string()
        }));

        for col in 0..data.column_count() {
            if date_columns.contains(&col) {
                continue;
            }
            report.add_change(map_column(&mut data, col, Stage::Capitalization, capitalize));
        }

        let (change, summary) = self.resolve_airlines(&mut data, airline, vocabulary);
        report.add_change(change);
        report.airlines = summary;

        tracing::info!(
            rows = data.row_count(),
            values_changed = report.values_changed,
            corrected = report.airlines.corrected,
            unresolved = report.airlines.unresolved,
            "Transformation complete"
        );

        Ok(PipelineOutput {
            table: data,
            report,
        })
    }

    fn require_column(&self, data: &DataTable, name: &str) -> Result<usize> {
        data.column_index(name)
            .ok_or_else(|| TarmacError::MissingColumn(name.to_string()))
    }

    /// Rewrite headers in place.
    fn normalize_headers(&self, data: &mut DataTable) -> Result<TransformChange> {
        let normalized = normalize_headers(&data.headers)?;

        let renamed: Vec<String> = data
            .headers
            .iter()
            .zip(&normalized)
            .filter(|(before, after)| before != after)
            .map(|(before, after)| format!("'{}' → '{}'", before, after))
            .collect();

        let mut change = TransformChange::new(Stage::HeaderNormalization, "");
        change.values_changed = renamed.len();
        change.description = format!("Renamed {} header(s): {}", renamed.len(), renamed.join(", "));

        tracing::debug!(renamed = renamed.len(), "Normalized headers");
        data.headers = normalized;
        Ok(change)
    }

    /// Parse every value of a date column and render it `DD-MM-YYYY`.
    fn normalize_dates(&self, data: &mut DataTable, col: usize) -> Result<TransformChange> {
        let column = data.headers[col].clone();
        let mut change = TransformChange::new(Stage::DateNormalization, column.clone());

        for row in 0..data.row_count() {
            let value = data.get(row, col).unwrap_or_default().to_string();
            if DataTable::is_unset(&value) {
                continue;
            }

            let rendered = self
                .dates
                .to_display(&value)
                .ok_or_else(|| TarmacError::DateParse {
                    column: column.clone(),
                    row,
                    value: value.clone(),
                })?;

            if rendered != value {
                change.record(row, &value, &rendered);
                data.set(row, col, rendered);
            }
        }

        tracing::debug!(column = %column, changed = change.values_changed, "Normalized dates");
        Ok(change.with_description(format!("Rendered dates in '{}' as DD-MM-YYYY", column)))
    }

    /// Replace airline values with their canonical spelling where possible.
    fn resolve_airlines(
        &self,
        data: &mut DataTable,
        col: usize,
        vocabulary: &Vocabulary,
    ) -> (TransformChange, AirlineSummary) {
        let column = data.headers[col].clone();
        let resolver =
            AirlineResolver::new(vocabulary).with_threshold(self.config.similarity_threshold);

        let mut change = TransformChange::new(Stage::AirlineResolution, column.clone());
        let mut summary = AirlineSummary::default();
        // Resolution is pure, so repeated values reuse the first answer.
        let mut seen: HashMap<String, Resolution> = HashMap::new();

        for row in 0..data.row_count() {
            let value = data.get(row, col).unwrap_or_default().to_string();
            if DataTable::is_unset(&value) {
                continue;
            }

            let resolution = seen
                .entry(value.clone())
                .or_insert_with(|| resolver.classify(&value))
                .clone();

            match &resolution {
                Resolution::Exact => summary.exact += 1,
                Resolution::Corrected { canonical, score } => {
                    summary.corrected += 1;
                    tracing::debug!(row, from = %value, to = %canonical, score, "Corrected airline");
                }
                Resolution::Unresolved => {
                    summary.unresolved += 1;
                    if !summary.unresolved_values.contains(&value) {
                        tracing::warn!(row, value = %value, "Airline not found in vocabulary; keeping as is");
                        summary.unresolved_values.push(value.clone());
                    }
                }
            }

            let resolved = resolution.apply(&value);
            if resolved != value {
                change.record(row, &value, &resolved);
                data.set(row, col, resolved);
            }
        }

        let change = change.with_description(format!(
            "Resolved '{}': {} exact, {} corrected, {} unresolved",
            column, summary.exact, summary.corrected, summary.unresolved
        ));
        (change, summary)
    }
}

/// Apply a pure per-value function to one column, recording what changed.
fn map_column<F>(data: &mut DataTable, col: usize, stage: Stage, f: F) -> TransformChange
where
    F: Fn(&str) -> String,
{
    let column = data.headers[col].clone();
    let mut change = TransformChange::new(stage, column.clone());

    for row in 0..data.row_count() {
        let value = data.get(row, col).unwrap_or_default();
        let updated = f(value);
        if updated != value {
            change.record(row, value, &updated);
            data.set(row, col, updated);
        }
    }

    let description = format!("{} on '{}'", stage, column);
    change.with_description(description)
}
