//! Dataset entry point
//!
//! [`Dataset`] is what report code talks to. Every call re-reads the
//! artifacts it needs; nothing is cached between calls.

use crate::artifacts::IndexFile;
use crate::catalog::ActivityCatalog;
use crate::config::{DatasetConfig, GenerationPolicy};
use crate::error::CatalogResult;
use crate::loaders::{load_index, load_mappings, load_taxonomy};
use crate::metadata::{Mappings, Taxonomy};
use crate::source::detect_generation;
use crate::store::{ArtifactStore, FsStore};

/// A dataset behind an [`ArtifactStore`]
#[derive(Debug, Clone)]
pub struct Dataset<S: ArtifactStore = FsStore> {
    store: S,
    generation: GenerationPolicy,
}

impl Dataset<FsStore> {
    /// Dataset on the filesystem, as described by `config`
    #[must_use]
    pub fn open(config: DatasetConfig) -> Self {
        let generation = config.generation;
        Self {
            store: FsStore::new(config),
            generation,
        }
    }
}

impl<S: ArtifactStore + 'static> Dataset<S> {
    /// Dataset over an arbitrary store
    #[inline]
    #[must_use]
    pub fn with_store(store: S, generation: GenerationPolicy) -> Self {
        Self { store, generation }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build the unified activity catalog
    ///
    /// # Errors
    /// Returns an error when the split generation is forced and its
    /// activities file cannot be read or decoded
    pub fn catalog(&self) -> CatalogResult<ActivityCatalog> {
        let source = detect_generation(&self.store, self.generation)?;
        let generation = source.generation();
        let resolved = source.resolve(&self.store);
        tracing::debug!(
            generation = %generation,
            activities = resolved.activities.len(),
            "catalog resolved"
        );
        Ok(ActivityCatalog::new(generation, resolved))
    }

    /// Index metadata by name, `None` if absent or undecodable
    #[must_use]
    pub fn index(&self, name: &str) -> Option<IndexFile> {
        load_index(&self.store, name)
    }

    /// Domain and category metadata
    ///
    /// # Errors
    /// Returns an error if `taxonomy.json` cannot be read or decoded
    pub fn taxonomy(&self) -> CatalogResult<Taxonomy> {
        load_taxonomy(&self.store)
    }

    /// ATUS and economic mappings
    ///
    /// # Errors
    /// Returns an error if `mappings.json` cannot be read or decoded
    pub fn mappings(&self) -> CatalogResult<Mappings> {
        load_mappings(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetLayout;
    use crate::source::Generation;
    use crate::store::MemoryStore;

    #[test]
    fn catalog_from_memory_store() {
        let store = MemoryStore::new()
            .with_file("activities.json", r#"{"activities": [{"id": "2.1.1", "name": "Filing"}]}"#)
            .with_file("indices/purpose.json", r#"{"name": "purpose", "values": {"2.1.1": 2}}"#);
        let dataset = Dataset::with_store(store, GenerationPolicy::Auto);

        let catalog = dataset.catalog().unwrap();
        assert_eq!(catalog.generation(), Generation::Split);
        assert_eq!(catalog.activities()[0].scores.purpose_name(), "Operational");
        assert_eq!(dataset.index("purpose").unwrap().coverage(), 1);
        assert!(dataset.index("abstraction").is_none());
    }

    #[test]
    fn forced_split_without_file_is_fatal() {
        let dataset = Dataset::with_store(MemoryStore::new(), GenerationPolicy::Split);
        assert!(dataset.catalog().unwrap_err().is_not_found());
    }

    #[test]
    fn nothing_on_disk_is_an_empty_legacy_catalog() {
        let dataset = Dataset::with_store(MemoryStore::new(), GenerationPolicy::Auto);
        let catalog = dataset.catalog().unwrap();
        assert_eq!(catalog.generation(), Generation::Legacy);
        assert!(catalog.is_empty());
        assert!(dataset.taxonomy().is_err());
    }

    #[test]
    fn renamed_merge_indices_are_consulted() {
        let layout = DatasetLayout {
            legacy_dir: "flat".into(),
            abstraction_index: "abstraction-v2".to_string(),
            ..DatasetLayout::default()
        };
        let store = MemoryStore::new()
            .with_layout(layout)
            .with_file("activities.json", r#"{"activities": [{"id": "4.1.1"}]}"#)
            .with_file("indices/abstraction.json", r#"{"values": {"4.1.1": 1}}"#)
            .with_file("indices/abstraction-v2.json", r#"{"values": {"4.1.1": 5}}"#)
            .with_file(
                "flat/domain-4.json",
                r#"{"activities": [{"id": "4.1.1", "scores": {"feedbackSpeed": 3}}]}"#,
            );
        let dataset = Dataset::with_store(store, GenerationPolicy::Auto);
        assert_eq!(dataset.store().layout().abstraction_index, "abstraction-v2");

        let catalog = dataset.catalog().unwrap();
        let scores = &catalog.activities()[0].scores;
        assert_eq!(scores.abstraction, 5);
        assert_eq!(scores.feedback_speed, 3);
    }
}
