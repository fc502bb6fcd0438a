//! Canonical airline names and fuzzy resolution against them.

mod cache;
mod resolver;

pub use cache::AirlineCache;
pub use resolver::{AirlineResolver, Resolution, resolve};

use indexmap::IndexSet;

/// Ordered, de-duplicated set of lowercase canonical airline names.
///
/// Order is the order names appeared in the cache artifact. Fuzzy-match
/// ties are broken by it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    names: IndexSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary; names are trimmed and lowercased, blanks dropped,
    /// later duplicates ignored.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// Whether `name` (already lowercase) is a canonical entry.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Entries in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
