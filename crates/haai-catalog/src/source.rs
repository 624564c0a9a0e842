//! Catalog sources and generation detection
//!
//! The dataset exists in two generations:
//! - **legacy**: per-domain files carrying complete scores
//! - **split**: one activities file, per-metric indices, dated assessments
//!
//! Each generation is a [`CatalogSource`]; [`detect_generation`] picks one
//! per invocation and the rest of the crate never branches on it again.

use crate::config::GenerationPolicy;
use crate::error::CatalogResult;
use crate::loaders::{load_legacy_domains, load_split_activities};
use crate::merge::{merge_scores, MergeReport, MergeSources};
use crate::store::ArtifactStore;
use crate::types::Activity;
use std::fmt;

/// Dataset generation a catalog was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    /// Per-domain files with complete scores
    Legacy,
    /// Consolidated activities plus indices and assessments
    Split,
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Split => f.write_str("split"),
        }
    }
}

/// Activities produced by a source, plus merge diagnostics when merged
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Fully scored activities in source order
    pub activities: Vec<Activity>,
    /// Present only when the score merger ran
    pub report: Option<MergeReport>,
}

/// One generation's way of producing the ordered activity list
pub trait CatalogSource<S: ArtifactStore> {
    /// Generation this source reads
    fn generation(&self) -> Generation;

    /// Produce the ordered, fully scored activity list
    fn resolve(self: Box<Self>, store: &S) -> Resolved;
}

/// Split generation: activities already decoded, scores still to merge
#[derive(Debug, Clone)]
pub struct SplitSource {
    activities: Vec<Activity>,
}

impl SplitSource {
    /// Decode the split activities file
    ///
    /// # Errors
    /// Returns an error if the activities file cannot be read or decoded
    pub fn load<S: ArtifactStore>(store: &S) -> CatalogResult<Self> {
        let file = load_split_activities(store)?;
        Ok(Self {
            activities: file.activities,
        })
    }

    /// Number of activities listed by the split file
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the split file listed no activities
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl<S: ArtifactStore> CatalogSource<S> for SplitSource {
    fn generation(&self) -> Generation {
        Generation::Split
    }

    fn resolve(self: Box<Self>, store: &S) -> Resolved {
        let sources = MergeSources::load(store);
        let (activities, report) = merge_scores(self.activities, &sources);
        Resolved {
            activities,
            report: Some(report),
        }
    }
}

/// Legacy generation: concatenation of per-domain files, no merging
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySource;

impl<S: ArtifactStore> CatalogSource<S> for LegacySource {
    fn generation(&self) -> Generation {
        Generation::Legacy
    }

    fn resolve(self: Box<Self>, store: &S) -> Resolved {
        let activities = load_legacy_domains(store)
            .into_iter()
            .flat_map(|file| {
                let domain_id = file.domain_id;
                file.activities.into_iter().map(move |mut activity| {
                    activity.domain_id = Some(domain_id);
                    activity
                })
            })
            .collect();

        Resolved {
            activities,
            report: None,
        }
    }
}

/// Select the catalog source for a store
///
/// Under [`GenerationPolicy::Auto`] the split generation is used when its
/// activities file decodes and lists at least one activity; any other
/// outcome falls back to legacy without error.
///
/// # Errors
/// Only under [`GenerationPolicy::Split`], when the activities file cannot
/// be read or decoded
pub fn detect_generation<S: ArtifactStore + 'static>(
    store: &S,
    policy: GenerationPolicy,
) -> CatalogResult<Box<dyn CatalogSource<S>>> {
    match policy {
        GenerationPolicy::Legacy => Ok(Box::new(LegacySource)),
        GenerationPolicy::Split => Ok(Box::new(SplitSource::load(store)?)),
        GenerationPolicy::Auto => match SplitSource::load(store) {
            Ok(split) if !split.is_empty() => {
                tracing::info!(activities = split.len(), "using split generation");
                Ok(Box::new(split))
            }
            Ok(_) => {
                tracing::info!("split activities file is empty, using legacy generation");
                Ok(Box::new(LegacySource))
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("no split activities file, using legacy generation");
                Ok(Box::new(LegacySource))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "split activities file unusable, using legacy generation"
                );
                Ok(Box::new(LegacySource))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const LEGACY_1: &str = r#"{
        "domainId": 1,
        "activities": [
            {"id": "1.1.1", "scores": {"abstraction": 2, "feedbackSpeed": 2, "socialComplexity": 3,
                                       "aiCapability": "solved", "agiWave": 1}}
        ]
    }"#;

    #[test]
    fn empty_split_file_falls_back_to_legacy() {
        let store = MemoryStore::new()
            .with_file("activities.json", r#"{"activities": []}"#)
            .with_file("activities/domain-1.json", LEGACY_1);

        let source = detect_generation(&store, GenerationPolicy::Auto).unwrap();
        assert_eq!(source.generation(), Generation::Legacy);
    }

    #[test]
    fn broken_split_file_falls_back_under_auto_only() {
        let store = MemoryStore::new().with_file("activities.json", "{oops");

        let auto = detect_generation(&store, GenerationPolicy::Auto).unwrap();
        assert_eq!(auto.generation(), Generation::Legacy);
        assert!(detect_generation(&store, GenerationPolicy::Split).is_err());
    }

    #[test]
    fn non_empty_split_file_selects_split() {
        let store = MemoryStore::new()
            .with_file("activities.json", r#"{"activities": [{"id": "1.1.1"}]}"#);
        let source = detect_generation(&store, GenerationPolicy::Auto).unwrap();
        assert_eq!(source.generation(), Generation::Split);
    }

    #[test]
    fn legacy_policy_ignores_split_file() {
        let store = MemoryStore::new()
            .with_file("activities.json", r#"{"activities": [{"id": "1.1.1"}]}"#)
            .with_file("activities/domain-1.json", LEGACY_1);

        let source = detect_generation(&store, GenerationPolicy::Legacy).unwrap();
        assert_eq!(source.generation(), Generation::Legacy);
    }

    #[test]
    fn legacy_resolution_uses_declared_domain() {
        let store = MemoryStore::new().with_file(
            "activities/domain-4.json",
            r#"{"domainId": 4, "activities": [{"id": "9.1.1"}, {"id": "bogus"}]}"#,
        );

        let resolved = Box::new(LegacySource).resolve(&store);
        assert!(resolved.report.is_none());
        assert_eq!(resolved.activities.len(), 2);
        assert!(resolved.activities.iter().all(|a| a.domain() == 4));
    }

    #[test]
    fn legacy_scores_pass_through_unmerged() {
        let store = MemoryStore::new().with_file("activities/domain-1.json", LEGACY_1);
        let resolved = Box::new(LegacySource).resolve(&store);

        let scores = &resolved.activities[0].scores;
        assert_eq!(scores.abstraction, 2);
        assert_eq!(scores.capability_str(), "solved");
        assert_eq!(scores.agi_wave, 1);
    }
}
