//! Artifact access
//!
//! The catalog never touches the filesystem directly. It asks an
//! [`ArtifactStore`] to read and decode artifacts by relative path:
//! - [`FsStore`] reads from a [`DatasetConfig`] root
//! - [`MemoryStore`] serves artifacts from memory
//!
//! Decoding is dispatched on the file extension through [`Format`].

use crate::config::{DatasetConfig, DatasetLayout};
use crate::error::{CatalogError, CatalogResult};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Structured-text formats the store can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `.json` via serde_json
    Json,
    /// `.yaml` / `.yml` via serde_yaml
    Yaml,
}

impl Format {
    /// All supported formats
    pub const ALL: [Format; 2] = [Format::Json, Format::Yaml];

    /// File extensions (without dot) handled by this format
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }

    /// Format for a path, chosen by extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext))
    }

    /// Decode `text` read from `path`
    ///
    /// # Errors
    /// Returns [`CatalogError::Decode`] when the text does not match `T`
    pub fn decode<T: DeserializeOwned>(self, path: &Path, text: &str) -> CatalogResult<T> {
        match self {
            Self::Json => serde_json::from_str(text)
                .map_err(|e| CatalogError::decode_error(path, e.to_string())),
            Self::Yaml => serde_yaml::from_str(text)
                .map_err(|e| CatalogError::decode_error(path, e.to_string())),
        }
    }
}

/// Every extension some [`Format`] recognizes
#[must_use]
pub fn recognized_extensions() -> Vec<&'static str> {
    Format::ALL
        .into_iter()
        .flat_map(Format::extensions)
        .copied()
        .collect()
}

/// Read-only access to dataset artifacts by relative path
pub trait ArtifactStore {
    /// Artifact locations for this store
    fn layout(&self) -> &DatasetLayout;

    /// Raw text of an artifact
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] when the artifact cannot be read
    fn read(&self, relative: &Path) -> CatalogResult<String>;

    /// File names directly inside a directory
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] when the directory cannot be listed
    fn list(&self, relative_dir: &Path) -> CatalogResult<Vec<String>>;

    /// Read and decode an artifact into `T`
    ///
    /// # Errors
    /// Returns an error if the extension is unknown, the read fails, or the
    /// text does not decode into `T`
    fn decode<T: DeserializeOwned>(&self, relative: &Path) -> CatalogResult<T> {
        let format = Format::from_path(relative)
            .ok_or_else(|| CatalogError::UnsupportedFormat(relative.to_path_buf()))?;
        let text = self.read(relative)?;
        format.decode(relative, &text)
    }
}

/// Filesystem-backed store rooted at a [`DatasetConfig`]
#[derive(Debug, Clone)]
pub struct FsStore {
    config: DatasetConfig,
}

impl FsStore {
    /// Create store for config
    #[inline]
    #[must_use]
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// Underlying config
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }
}

impl ArtifactStore for FsStore {
    fn layout(&self) -> &DatasetLayout {
        &self.config.layout
    }

    fn read(&self, relative: &Path) -> CatalogResult<String> {
        let path = self.config.resolve(relative);
        std::fs::read_to_string(&path).map_err(|e| CatalogError::io_error(path, e))
    }

    fn list(&self, relative_dir: &Path) -> CatalogResult<Vec<String>> {
        let dir = self.config.resolve(relative_dir);
        let entries = std::fs::read_dir(&dir).map_err(|e| CatalogError::io_error(&dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::io_error(&dir, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

/// In-memory store, keyed by relative path
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    layout: DatasetLayout,
    files: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    /// Create empty store with the default layout
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a custom layout
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: DatasetLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Add or replace an artifact
    pub fn insert(&mut self, relative: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(relative.into(), text.into());
    }

    /// Builder form of [`MemoryStore::insert`]
    #[must_use]
    pub fn with_file(mut self, relative: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(relative, text);
        self
    }
}

impl ArtifactStore for MemoryStore {
    fn layout(&self) -> &DatasetLayout {
        &self.layout
    }

    fn read(&self, relative: &Path) -> CatalogResult<String> {
        self.files.get(relative).cloned().ok_or_else(|| {
            CatalogError::io_error(
                relative,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such artifact"),
            )
        })
    }

    fn list(&self, relative_dir: &Path) -> CatalogResult<Vec<String>> {
        let names: Vec<String> = self
            .files
            .keys()
            .filter(|path| path.parent() == Some(relative_dir))
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .collect();

        if names.is_empty() {
            return Err(CatalogError::io_error(
                relative_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
            ));
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn format_by_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("b.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("b.yaml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("b.toml")), None);
        assert_eq!(Format::from_path(Path::new("README")), None);
    }

    #[test]
    fn recognized_extensions_cover_all_formats() {
        let exts = recognized_extensions();
        assert_eq!(exts, vec!["json", "yaml", "yml"]);
    }

    #[test]
    fn yaml_and_json_decode_alike() {
        let from_json: Value = Format::Json
            .decode(Path::new("a.json"), r#"{"date": "2024-06-01"}"#)
            .unwrap();
        let from_yaml: Value = Format::Yaml
            .decode(Path::new("a.yaml"), "date: \"2024-06-01\"\n")
            .unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn memory_store_reads_and_lists() {
        let store = MemoryStore::new()
            .with_file("assessments/2024-01-01.json", "{}")
            .with_file("assessments/notes.txt", "")
            .with_file("taxonomy.json", "{}");

        let mut names = store.list(Path::new("assessments")).unwrap();
        names.sort();
        assert_eq!(names, vec!["2024-01-01.json", "notes.txt"]);

        assert!(store.read(Path::new("missing.json")).unwrap_err().is_not_found());
        assert!(store.list(Path::new("indices")).unwrap_err().is_not_found());
    }

    #[test]
    fn decode_rejects_unknown_extension() {
        let store = MemoryStore::new().with_file("data.toml", "a = 1");
        let err = store.decode::<Value>(Path::new("data.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
    }

    #[test]
    fn fs_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("indices")).unwrap();
        std::fs::write(dir.path().join("indices/purpose.json"), r#"{"name": "purpose"}"#).unwrap();

        let store = FsStore::new(DatasetConfig::new(dir.path()));
        let value: Value = store.decode(Path::new("indices/purpose.json")).unwrap();
        assert_eq!(value["name"], "purpose");
        assert_eq!(store.list(Path::new("indices")).unwrap(), vec!["purpose.json"]);
        assert!(store.read(Path::new("nope.json")).unwrap_err().is_not_found());
    }
}
