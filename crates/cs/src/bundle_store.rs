//! Bundle file storage.
//!
//! A bundle is a JSON file holding cards, sets, filters and catalogs. Its
//! location comes from `--bundle` / `CS_BUNDLE`, falling back to the `bundle`
//! key of the config file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cardset_collection_rs::bundle::Bundle;
use thiserror::Error;

/// Errors that can occur while loading a bundle.
#[derive(Debug, Error)]
pub enum BundleStoreError {
    /// Neither the command line nor the config names a bundle.
    #[error("no bundle given: pass --bundle, set CS_BUNDLE, or run 'cs config set bundle <PATH>'")]
    NoBundle,

    /// I/O error during file read.
    #[error("failed to read bundle file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not a valid bundle.
    #[error("invalid bundle file '{path}': {source}")]
    Json {
        /// The path that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for bundle store operations.
pub type Result<T> = std::result::Result<T, BundleStoreError>;

/// Reads bundles and pending filter snapshots from disk.
#[derive(Debug, Clone)]
pub struct BundleStore {
    path: PathBuf,
}

impl BundleStore {
    /// Creates a store for the bundle at `path`.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Picks the bundle path: the explicit one if given, else the configured
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `BundleStoreError::NoBundle` if neither is set.
    pub fn resolve(explicit: Option<&Path>, configured: Option<&Path>) -> Result<Self> {
        explicit
            .or(configured)
            .map(|path| Self::with_path(path.to_path_buf()))
            .ok_or(BundleStoreError::NoBundle)
    }

    /// Returns the path to the bundle file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the bundle from disk.
    ///
    /// # Errors
    ///
    /// - Returns `BundleStoreError::ReadError` if the file cannot be read.
    /// - Returns `BundleStoreError::Json` if the file is not a valid bundle.
    pub fn load(&self) -> Result<Bundle> {
        let bundle: Bundle = read_json(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            cards = bundle.cards.len(),
            "loaded bundle"
        );
        Ok(bundle)
    }
}

/// Reads any JSON document, reporting errors against `path`.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| BundleStoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| BundleStoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let store =
            BundleStore::resolve(Some(Path::new("a.json")), Some(Path::new("b.json"))).unwrap();
        assert_eq!(store.path(), Path::new("a.json"));

        let store = BundleStore::resolve(None, Some(Path::new("b.json"))).unwrap();
        assert_eq!(store.path(), Path::new("b.json"));
    }

    #[test]
    fn test_resolve_without_any_path() {
        assert!(matches!(
            BundleStore::resolve(None, None),
            Err(BundleStoreError::NoBundle)
        ));
    }

    #[test]
    fn test_load_bundle() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "bundle.json",
            r#"{"cards": [{"id": "a", "title": "A"}], "sets": {"main": ["a"]}}"#,
        );

        let bundle = BundleStore::with_path(path).load().unwrap();
        assert_eq!(bundle.cards.len(), 1);
        assert_eq!(bundle.sets["main"], vec!["a"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let err = BundleStore::with_path(path.clone()).load().unwrap_err();
        match err {
            BundleStoreError::ReadError { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("Expected ReadError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bundle.json", "{ not json");

        let err = BundleStore::with_path(path).load().unwrap_err();
        assert!(matches!(err, BundleStoreError::Json { .. }));
        assert!(err.to_string().contains("invalid bundle file"));
    }

    #[test]
    fn test_read_json_map() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "pending.json", r#"{"starred": ["a"]}"#);

        let pending: HashMap<String, Vec<String>> = read_json(&path).unwrap();
        assert_eq!(pending["starred"], vec!["a"]);
    }
}
