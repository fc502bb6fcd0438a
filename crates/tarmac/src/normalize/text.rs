//! Per-value text transforms for passenger and airline columns.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, TarmacError};

/// Strips a leading honorific such as `MR` or `MRS` from passenger names.
///
/// The honorific must be followed by a period or whitespace, so names that
/// merely begin with the same letters are left alone.
#[derive(Debug, Clone)]
pub struct PrefixStripper {
    pattern: Regex,
}

impl PrefixStripper {
    /// Build a stripper for the given honorifics (matched case-insensitively).
    pub fn new<S: AsRef<str>>(honorifics: &[S]) -> Result<Self> {
        let mut tokens: Vec<String> = honorifics
            .iter()
            .map(|h| h.as_ref().trim().trim_end_matches('.'))
            .filter(|h| !h.is_empty())
            .map(regex::escape)
            .collect();

        if tokens.is_empty() {
            return Err(TarmacError::Config(
                "At least one honorific is required".to_string(),
            ));
        }

        // Longest first so "MRS" wins over "MR".
        tokens.sort_by(|a, b| b.len().cmp(&a.len()));

        let pattern = Regex::new(&format!(r"(?i)^(?:{})(?:\.\s*|\s+)", tokens.join("|")))
            .map_err(|e| TarmacError::Config(format!("Invalid honorific list: {}", e)))?;

        Ok(Self { pattern })
    }

    /// Remove the honorific, keeping the rest of the name verbatim.
    pub fn strip<'a>(&self, name: &'a str) -> &'a str {
        match self.pattern.find(name) {
            Some(m) => &name[m.end()..],
            None => name,
        }
    }
}

static DEFAULT_STRIPPER: Lazy<PrefixStripper> =
    Lazy::new(|| PrefixStripper::new(&["MR", "MRS"]).expect("default honorifics are valid"));

impl Default for PrefixStripper {
    /// Strips `MR` and `MRS`.
    fn default() -> Self {
        DEFAULT_STRIPPER.clone()
    }
}

/// Collapse a value of the form `X/X` to `X`.
///
/// ```
/// use tarmac::normalize::collapse_duplicate;
///
/// assert_eq!(collapse_duplicate("Indigo/Indigo"), "Indigo");
/// assert_eq!(collapse_duplicate("Indigo/SpiceJet"), "Indigo/SpiceJet");
/// ```
pub fn collapse_duplicate(value: &str) -> &str {
    match value.split_once('/') {
        Some((left, right)) if !left.is_empty() && left == right => left,
        _ => value,
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
