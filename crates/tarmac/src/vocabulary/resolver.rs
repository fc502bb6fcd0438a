//! Fuzzy correction of airline names against the canonical vocabulary.

use rapidfuzz::distance::indel;

use super::Vocabulary;
use crate::config::DEFAULT_SIMILARITY_THRESHOLD;
use crate::normalize::capitalize;

/// Outcome of resolving one airline name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The name is already canonical (case-insensitively).
    Exact,
    /// The closest canonical name cleared the threshold.
    Corrected {
        /// Vocabulary entry, lowercase.
        canonical: String,
        /// Similarity in `0.0..=1.0`.
        score: f64,
    },
    /// Nothing cleared the threshold; the name passes through.
    Unresolved,
}

impl Resolution {
    /// The value written back for `name`.
    pub fn apply(&self, name: &str) -> String {
        match self {
            Resolution::Corrected { canonical, .. } => capitalize(canonical),
            Resolution::Exact | Resolution::Unresolved => name.to_string(),
        }
    }
}

/// Maps observed airline strings onto the closest vocabulary entry.
///
/// Similarity is the Indel ratio, `2 * matches / (len_a + len_b)`. Among
/// candidates at or above the threshold the highest score wins; ties go to
/// the entry that comes first in the vocabulary.
#[derive(Debug, Clone)]
pub struct AirlineResolver<'a> {
    vocabulary: &'a Vocabulary,
    threshold: f64,
}

impl<'a> AirlineResolver<'a> {
    /// Resolver with the default 0.6 threshold.
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Resolve `name` to the value that should be stored.
    pub fn resolve(&self, name: &str) -> String {
        self.classify(name).apply(name)
    }

    /// Work out how `name` relates to the vocabulary.
    pub fn classify(&self, name: &str) -> Resolution {
        if name.trim().is_empty() {
            return Resolution::Unresolved;
        }

        let lowered = name.to_lowercase();
        if self.vocabulary.contains(&lowered) {
            return Resolution::Exact;
        }

        let len = lowered.chars().count();
        let mut best: Option<(&str, f64)> = None;

        for candidate in self.vocabulary.iter() {
            let candidate_len = candidate.chars().count();
            // Upper bound of the ratio when every char of the shorter string matches.
            let ceiling = 2.0 * len.min(candidate_len) as f64 / (len + candidate_len) as f64;
            if ceiling < self.threshold {
                continue;
            }

            let score = indel::normalized_similarity(lowered.chars(), candidate.chars());
            if score < self.threshold {
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }

        match best {
            Some((canonical, score)) => Resolution::Corrected {
                canonical: canonical.to_string(),
                score,
            },
            None => Resolution::Unresolved,
        }
    }
}

/// Resolve one name with the default threshold.
///
/// ```
/// use tarmac::vocabulary::{Vocabulary, resolve};
///
/// let vocab = Vocabulary::new(["air india", "indigo"]);
/// assert_eq!(resolve("Airindia", &vocab), "Air india");
/// assert_eq!(resolve("Zzzzzz", &vocab), "Zzzzzz");
/// ```
pub fn resolve(name: &str, vocabulary: &Vocabulary) -> String {
    AirlineResolver::new(vocabulary).resolve(name)
}
