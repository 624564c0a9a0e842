//! On-disk artifact shapes
//!
//! Each struct mirrors one file kind of the dataset. Decoding is
//! best-effort: absent fields take their zero value.

use crate::types::{
    capability_field, lenient_score, lenient_score_map, null_as_default, Activity, Capability,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Legacy per-domain file: activities with complete scores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyDomainFile {
    /// Declared domain number
    pub domain_id: u32,
    /// Declared domain name
    pub domain_name: String,
    /// Activities of the domain, fully scored
    pub activities: Vec<Activity>,
}

/// Consolidated split-generation activities file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitActivitiesFile {
    /// Activities in listing order; scores are usually omitted
    pub activities: Vec<Activity>,
}

/// One level of an index scale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleLevel {
    /// Numeric level
    #[serde(deserialize_with = "lenient_score")]
    pub level: u8,
    /// Short level name
    pub name: String,
    /// What the level means
    pub definition: String,
}

/// Scale definition of an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scale {
    /// Lowest level
    #[serde(deserialize_with = "lenient_score")]
    pub min: u8,
    /// Highest level
    #[serde(deserialize_with = "lenient_score")]
    pub max: u8,
    /// Level descriptions in ascending order
    pub levels: Vec<ScaleLevel>,
}

impl Scale {
    /// Description of a level, if the scale defines it
    #[must_use]
    pub fn level(&self, level: u8) -> Option<&ScaleLevel> {
        self.levels.iter().find(|l| l.level == level)
    }
}

/// A named metric: scale plus per-activity values
///
/// Coverage may be partial; activities missing from `values` are simply
/// not scored by this index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexFile {
    /// Metric name, e.g. `"abstraction"`
    pub name: String,
    /// Free-text description of the metric
    pub description: String,
    /// Scale definition
    pub scale: Scale,
    /// Activity id -> value
    #[serde(deserialize_with = "lenient_score_map")]
    pub values: BTreeMap<String, u8>,
}

impl IndexFile {
    /// Value for an activity, if covered
    #[inline]
    #[must_use]
    pub fn value(&self, activity_id: &str) -> Option<u8> {
        self.values.get(activity_id).copied()
    }

    /// Number of activities this index scores
    #[inline]
    #[must_use]
    pub fn coverage(&self) -> usize {
        self.values.len()
    }
}

/// Capability / bottleneck / wave judgment for one activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assessment {
    /// AI capability status
    #[serde(rename = "aiCapability", deserialize_with = "capability_field")]
    pub capability: Option<Capability>,
    /// Bottleneck category
    #[serde(deserialize_with = "null_as_default")]
    pub bottleneck: String,
    /// AGI wave
    #[serde(deserialize_with = "lenient_score")]
    pub agi_wave: u8,
}

/// A dated assessment snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentFile {
    /// Snapshot date as written in the file
    pub date: String,
    /// Activity id -> judgment
    pub assessments: BTreeMap<String, Assessment>,
}
