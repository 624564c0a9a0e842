//! Unified activity catalog
//!
//! The single artifact consumed by every report. Activities keep the order
//! of their source; duplicate identifiers are retained as separate records.

use crate::config::LEGACY_DOMAIN_COUNT;
use crate::merge::MergeReport;
use crate::source::{Generation, Resolved};
use crate::types::{Activity, Capability};
use std::collections::BTreeMap;

/// Ordered, fully merged activities
#[derive(Debug, Clone)]
pub struct ActivityCatalog {
    generation: Generation,
    activities: Vec<Activity>,
    merge_report: Option<MergeReport>,
}

impl ActivityCatalog {
    /// Build from a resolved source
    #[must_use]
    pub fn new(generation: Generation, resolved: Resolved) -> Self {
        Self {
            generation,
            activities: resolved.activities,
            merge_report: resolved.report,
        }
    }

    /// Generation the catalog was built from
    #[inline]
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// All activities in catalog order
    #[inline]
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Merge diagnostics; `None` for legacy catalogs
    #[inline]
    #[must_use]
    pub fn merge_report(&self) -> Option<&MergeReport> {
        self.merge_report.as_ref()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// First activity with the given id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Activities owned by a domain
    pub fn in_domain(&self, domain: u32) -> impl Iterator<Item = &Activity> + '_ {
        self.activities.iter().filter(move |a| a.domain() == domain)
    }

    /// Activities in an AGI wave
    pub fn in_wave(&self, wave: u8) -> impl Iterator<Item = &Activity> + '_ {
        self.activities.iter().filter(move |a| a.scores.agi_wave == wave)
    }

    /// Activities with a capability status (matched on its wire name)
    pub fn with_capability<'a>(
        &'a self,
        status: &'a str,
    ) -> impl Iterator<Item = &'a Activity> + 'a {
        self.activities
            .iter()
            .filter(move |a| a.scores.capability_str() == status)
    }

    /// Activities with a bottleneck category
    pub fn with_bottleneck<'a>(
        &'a self,
        bottleneck: &'a str,
    ) -> impl Iterator<Item = &'a Activity> + 'a {
        self.activities
            .iter()
            .filter(move |a| a.scores.bottleneck == bottleneck)
    }

    /// Case-insensitive substring search over name and description
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Activity> {
        let needle = term.to_lowercase();
        self.activities
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&needle)
                    || a.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Summary counts
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total: self.activities.len(),
            ..CatalogStats::default()
        };

        let mut bottlenecks: BTreeMap<&str, usize> = BTreeMap::new();
        for activity in &self.activities {
            let scores = &activity.scores;
            *stats
                .by_capability
                .entry(scores.capability_str().to_string())
                .or_default() += 1;
            *stats.by_wave.entry(scores.agi_wave).or_default() += 1;
            *bottlenecks.entry(scores.bottleneck.as_str()).or_default() += 1;
            *stats.by_domain.entry(activity.domain()).or_default() += 1;
        }

        stats.by_bottleneck = bottlenecks
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        // stable sort keeps alphabetical order among equal counts
        stats.by_bottleneck.sort_by(|a, b| b.1.cmp(&a.1));

        stats
    }
}

/// Summary counts over a catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStats {
    /// Number of records
    pub total: usize,
    /// Capability wire name (empty = unassessed) -> count
    pub by_capability: BTreeMap<String, usize>,
    /// Wave -> count
    pub by_wave: BTreeMap<u8, usize>,
    /// Non-empty bottlenecks, most frequent first
    pub by_bottleneck: Vec<(String, usize)>,
    /// Domain -> count
    pub by_domain: BTreeMap<u32, usize>,
}

impl CatalogStats {
    /// Count for a capability status
    #[must_use]
    pub fn capability_count(&self, status: &Capability) -> usize {
        self.by_capability.get(status.as_str()).copied().unwrap_or(0)
    }

    /// Count for a wave
    #[must_use]
    pub fn wave_count(&self, wave: u8) -> usize {
        self.by_wave.get(&wave).copied().unwrap_or(0)
    }

    /// Count for a domain
    #[must_use]
    pub fn domain_count(&self, domain: u32) -> usize {
        self.by_domain.get(&domain).copied().unwrap_or(0)
    }

    /// Per-domain counts for domains `1..=10`, zero-filled
    #[must_use]
    pub fn domain_counts(&self) -> Vec<(u32, usize)> {
        (1..=LEGACY_DOMAIN_COUNT)
            .map(|d| (d, self.domain_count(d)))
            .collect()
    }

    /// Share of the catalog in percent; `0.0` for an empty catalog
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64 * 100.0
    }
}
