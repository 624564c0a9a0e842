//! Dataset configuration
//!
//! [`DatasetConfig`] names the dataset root and the relative location of
//! every artifact. It is passed explicitly to every loader, so several
//! fixture roots can be used side by side in one process.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of legacy per-domain files probed (`1..=LEGACY_DOMAIN_COUNT`)
pub const LEGACY_DOMAIN_COUNT: u32 = 10;

/// Relative artifact locations under the dataset root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetLayout {
    /// Domain and category metadata
    pub taxonomy: PathBuf,
    /// ATUS and economic mappings
    pub mappings: PathBuf,
    /// Directory holding `domain-<n>.json` legacy files
    pub legacy_dir: PathBuf,
    /// Consolidated split-generation activities file
    pub activities: PathBuf,
    /// Directory holding `<name>.json` index files
    pub indices_dir: PathBuf,
    /// Directory holding dated assessment files
    pub assessments_dir: PathBuf,
    /// Index consulted for abstraction
    pub abstraction_index: String,
    /// Index consulted for error tolerance
    pub error_tolerance_index: String,
    /// Index consulted for purpose
    pub purpose_index: String,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            taxonomy: PathBuf::from("taxonomy.json"),
            mappings: PathBuf::from("mappings.json"),
            legacy_dir: PathBuf::from("activities"),
            activities: PathBuf::from("activities.json"),
            indices_dir: PathBuf::from("indices"),
            assessments_dir: PathBuf::from("assessments"),
            abstraction_index: "abstraction".to_string(),
            error_tolerance_index: "error-tolerance".to_string(),
            purpose_index: "purpose".to_string(),
        }
    }
}

impl DatasetLayout {
    /// Relative path of legacy domain file `n`
    #[inline]
    #[must_use]
    pub fn legacy_domain(&self, n: u32) -> PathBuf {
        self.legacy_dir.join(format!("domain-{n}.json"))
    }

    /// Relative path of the index called `name`
    #[inline]
    #[must_use]
    pub fn index(&self, name: &str) -> PathBuf {
        self.indices_dir.join(format!("{name}.json"))
    }
}

/// Which dataset generation to build the catalog from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPolicy {
    /// Split when its activities file decodes and is non-empty, else legacy
    #[default]
    Auto,
    /// Split only; a missing or broken activities file is fatal
    Split,
    /// Legacy per-domain files only
    Legacy,
}

impl std::str::FromStr for GenerationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "split" => Ok(Self::Split),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown generation '{other}' (auto, split, legacy)")),
        }
    }
}

/// Dataset root plus layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory all artifact paths are relative to
    pub root: PathBuf,
    /// Artifact locations
    #[serde(default)]
    pub layout: DatasetLayout,
    /// Generation selection
    #[serde(default)]
    pub generation: GenerationPolicy,
}

impl DatasetConfig {
    /// Config for `root` with the default layout
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: DatasetLayout::default(),
            generation: GenerationPolicy::default(),
        }
    }

    /// With a custom layout
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: DatasetLayout) -> Self {
        self.layout = layout;
        self
    }

    /// With a generation policy
    #[inline]
    #[must_use]
    pub fn with_generation(mut self, generation: GenerationPolicy) -> Self {
        self.generation = generation;
        self
    }

    /// Absolute (root-joined) path of a relative artifact path
    #[inline]
    #[must_use]
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_paths() {
        let layout = DatasetLayout::default();
        assert_eq!(layout.legacy_domain(3), PathBuf::from("activities/domain-3.json"));
        assert_eq!(layout.index("purpose"), PathBuf::from("indices/purpose.json"));
    }

    #[test]
    fn resolve_joins_root() {
        let config = DatasetConfig::new("/data/haai");
        assert_eq!(
            config.resolve(Path::new("taxonomy.json")),
            PathBuf::from("/data/haai/taxonomy.json")
        );
    }

    #[test]
    fn layout_overrides_deserialize() {
        let config: DatasetConfig = serde_json::from_str(
            r#"{"root": "/data", "layout": {"activities": "v2/activities.json"}}"#,
        )
        .unwrap();

        assert_eq!(config.layout.activities, PathBuf::from("v2/activities.json"));
        assert_eq!(config.layout.taxonomy, PathBuf::from("taxonomy.json"));
        assert_eq!(config.generation, GenerationPolicy::Auto);
    }

    #[test]
    fn generation_policy_parses() {
        assert_eq!("split".parse::<GenerationPolicy>(), Ok(GenerationPolicy::Split));
        assert_eq!("legacy".parse::<GenerationPolicy>(), Ok(GenerationPolicy::Legacy));
        assert!("flat".parse::<GenerationPolicy>().is_err());
    }
}
