//! Raw loaders
//!
//! One function per artifact kind, no cross-file knowledge. Loaders of
//! optional artifacts swallow every failure and return `None` (logged at
//! `debug`); loaders of required artifacts propagate [`CatalogError`].
//!
//! [`CatalogError`]: crate::error::CatalogError

use crate::artifacts::{AssessmentFile, IndexFile, LegacyDomainFile, SplitActivitiesFile};
use crate::assessment::select_latest;
use crate::config::LEGACY_DOMAIN_COUNT;
use crate::error::CatalogResult;
use crate::metadata::{Mappings, Taxonomy};
use crate::store::{recognized_extensions, ArtifactStore};
use crate::types::UNASSIGNED_DOMAIN;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Decode an optional artifact, treating any failure as "no contribution"
fn decode_optional<S, T>(store: &S, relative: &Path) -> Option<T>
where
    S: ArtifactStore,
    T: DeserializeOwned,
{
    match store.decode(relative) {
        Ok(value) => Some(value),
        Err(e) if e.is_not_found() => {
            tracing::debug!(path = %relative.display(), "optional artifact absent");
            None
        }
        Err(e) => {
            tracing::debug!(path = %relative.display(), error = %e, "optional artifact skipped");
            None
        }
    }
}

/// Legacy domain file `n`, if present and decodable
///
/// A file that declares no domain (or domain 0) is attributed to `n`.
pub fn load_legacy_domain<S: ArtifactStore>(store: &S, n: u32) -> Option<LegacyDomainFile> {
    let mut file: LegacyDomainFile = decode_optional(store, &store.layout().legacy_domain(n))?;
    if file.domain_id == UNASSIGNED_DOMAIN {
        file.domain_id = n;
    }
    Some(file)
}

/// Every decodable legacy domain file, in domain order `1..=10`
pub fn load_legacy_domains<S: ArtifactStore>(store: &S) -> Vec<LegacyDomainFile> {
    (1..=LEGACY_DOMAIN_COUNT)
        .filter_map(|n| load_legacy_domain(store, n))
        .collect()
}

/// The consolidated split-generation activities file
///
/// # Errors
/// Returns an error if the file cannot be read or decoded
pub fn load_split_activities<S: ArtifactStore>(store: &S) -> CatalogResult<SplitActivitiesFile> {
    store.decode(&store.layout().activities)
}

/// Index file called `name`, if present and decodable
pub fn load_index<S: ArtifactStore>(store: &S, name: &str) -> Option<IndexFile> {
    decode_optional(store, &store.layout().index(name))
}

/// The most recent assessment snapshot, if any
///
/// Candidates are the files of the assessments directory with a recognized
/// extension; the lexicographically greatest name wins.
pub fn load_latest_assessment<S: ArtifactStore>(store: &S) -> Option<AssessmentFile> {
    let dir = &store.layout().assessments_dir;
    let names = match store.list(dir) {
        Ok(names) => names,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "no assessments directory");
            return None;
        }
    };

    let latest = select_latest(&names, &recognized_extensions())?;
    tracing::debug!(file = latest, "selected assessment");
    decode_optional(store, &dir.join(latest))
}

/// `taxonomy.json`
///
/// # Errors
/// Returns an error if the file cannot be read or decoded
pub fn load_taxonomy<S: ArtifactStore>(store: &S) -> CatalogResult<Taxonomy> {
    store.decode(&store.layout().taxonomy)
}

/// `mappings.json`
///
/// # Errors
/// Returns an error if the file cannot be read or decoded
pub fn load_mappings<S: ArtifactStore>(store: &S) -> CatalogResult<Mappings> {
    store.decode(&store.layout().mappings)
}
