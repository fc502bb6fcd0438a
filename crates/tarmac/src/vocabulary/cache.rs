//! Serialized airline vocabulary: load it, or rebuild it from the JSON source.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tempfile::NamedTempFile;

use super::Vocabulary;
use crate::error::{Result, TarmacError};

/// Shape of the vocabulary source document.
#[derive(Debug, Deserialize)]
struct AirlineSource {
    airlines: Vec<String>,
}

/// The on-disk vocabulary artifact.
///
/// The artifact is a JSON array of names. Rebuilds write a sibling temp file
/// and rename it over the artifact, so readers see either the old list or the
/// new one.
#[derive(Debug, Clone)]
pub struct AirlineCache {
    path: PathBuf,
}

impl AirlineCache {
    /// Cache stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the artifact into a [`Vocabulary`].
    pub fn load(&self) -> Result<Vocabulary> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e.to_string()))?;

        let names: Vec<String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| self.unavailable(format!("corrupt artifact: {}", e)))?;

        let vocabulary = Vocabulary::new(&names);
        if vocabulary.is_empty() {
            tracing::warn!(path = %self.path.display(), "Airline cache is empty; no names will be corrected");
        } else {
            tracing::info!(path = %self.path.display(), entries = vocabulary.len(), "Loaded airline cache");
        }

        Ok(vocabulary)
    }

    /// Replace the artifact with the `airlines` list from a JSON source file.
    ///
    /// Returns the names written, in source order.
    pub fn rebuild(&self, source: impl AsRef<Path>) -> Result<Vec<String>> {
        let source = source.as_ref();

        let content = fs::read_to_string(source).map_err(|e| TarmacError::SourceUnavailable {
            path: source.to_path_buf(),
            source: e,
        })?;

        let document: AirlineSource =
            serde_json::from_str(&content).map_err(|e| TarmacError::SourceMalformed {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;

        let names: Vec<String> = document
            .airlines
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        self.write_atomic(&names)?;

        tracing::info!(
            source = %source.display(),
            path = %self.path.display(),
            entries = names.len(),
            "Rebuilt airline cache"
        );

        Ok(names)
    }

    fn write_atomic(&self, names: &[String]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer(&mut writer, names)
                .map_err(|e| io_error(&self.path, e.into()))?;
            writer.flush().map_err(|e| io_error(&self.path, e))?;
        }
        temp.as_file().sync_all().map_err(|e| io_error(&self.path, e))?;

        temp.persist(&self.path)
            .map_err(|e| io_error(&self.path, e.error))?;

        Ok(())
    }

    fn unavailable(&self, reason: String) -> TarmacError {
        TarmacError::CacheUnavailable {
            path: self.path.clone(),
            reason,
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> TarmacError {
    TarmacError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_rebuild_then_load() {
        let dir = TempDir::new().unwrap();
        let source = write(&dir, "source.json", r#"{"airlines": ["Air India", "IndiGo", " Vistara "]}"#);
        let cache = AirlineCache::new(dir.path().join("cache/airlines.json"));

        let written = cache.rebuild(&source).unwrap();
        assert_eq!(written, vec!["Air India", "IndiGo", "Vistara"]);

        let vocab = cache.load().unwrap();
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["air india", "indigo", "vistara"]);
    }

    #[test]
    fn test_rebuild_replaces_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let cache = AirlineCache::new(dir.path().join("airlines.json"));

        let first = write(&dir, "a.json", r#"{"airlines": ["Delta"]}"#);
        let second = write(&dir, "b.json", r#"{"airlines": ["United", "Emirates"]}"#);

        cache.rebuild(&first).unwrap();
        cache.rebuild(&second).unwrap();

        let vocab = cache.load().unwrap();
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["united", "emirates"]);
    }

    #[test]
    fn test_failed_rebuild_keeps_old_artifact() {
        let dir = TempDir::new().unwrap();
        let cache = AirlineCache::new(dir.path().join("airlines.json"));
        let good = write(&dir, "good.json", r#"{"airlines": ["Delta"]}"#);
        let bad = write(&dir, "bad.json", r#"{"carriers": ["United"]}"#);

        cache.rebuild(&good).unwrap();
        assert!(cache.rebuild(&bad).is_err());
        assert!(cache.load().unwrap().contains("delta"));
    }

    #[test]
    fn test_rebuild_reports_unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = write(&dir, "blocker", "");
        let source = write(&dir, "source.json", r#"{"airlines": ["Delta"]}"#);
        let cache = AirlineCache::new(blocker.join("airlines.json"));

        match cache.rebuild(&source) {
            Err(TarmacError::Io { path, .. }) => assert_eq!(path, blocker),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let cache = AirlineCache::new(dir.path().join("missing.json"));
        assert!(matches!(cache.load(), Err(TarmacError::CacheUnavailable { .. })));
    }

    #[test]
    fn test_load_corrupt_artifact() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "airlines.json", "{not json");
        let cache = AirlineCache::new(path);
        assert!(matches!(cache.load(), Err(TarmacError::CacheUnavailable { .. })));
    }

    #[test]
    fn test_source_errors() {
        let dir = TempDir::new().unwrap();
        let cache = AirlineCache::new(dir.path().join("airlines.json"));

        let missing = dir.path().join("nope.json");
        assert!(matches!(
            cache.rebuild(&missing),
            Err(TarmacError::SourceUnavailable { .. })
        ));

        let invalid = write(&dir, "invalid.json", "airlines: [");
        assert!(matches!(
            cache.rebuild(&invalid),
            Err(TarmacError::SourceMalformed { .. })
        ));

        let wrong_type = write(&dir, "wrong.json", r#"{"airlines": ["Delta", 7]}"#);
        assert!(matches!(
            cache.rebuild(&wrong_type),
            Err(TarmacError::SourceMalformed { .. })
        ));

        assert!(!cache.path().exists());
    }
}
