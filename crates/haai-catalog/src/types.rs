//! Core types for the catalog
//!
//! Defines the per-activity record and its score set:
//! - [`Activity`]: one taxonomy leaf, identified by a hierarchical id
//! - [`ScoreSet`]: the seven automation-relevant scores
//! - [`Capability`]: AI capability status
//! - purpose level names and domain derivation helpers

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Domain number meaning "unassigned"
pub const UNASSIGNED_DOMAIN: u32 = 0;

/// Purpose level names, indexed by level - 1
const PURPOSE_NAMES: [&str; 5] = [
    "Productive",
    "Operational",
    "Developmental",
    "Relational",
    "Restorative",
];

/// Name for a purpose level (1-5); anything else is `"Unknown"`
#[inline]
#[must_use]
pub fn purpose_name(level: u8) -> &'static str {
    match level {
        1..=5 => PURPOSE_NAMES[usize::from(level) - 1],
        _ => "Unknown",
    }
}

/// Derive the owning domain from a hierarchical identifier
///
/// Takes the first dot-separated segment as an integer. Empty or
/// non-numeric segments resolve to [`UNASSIGNED_DOMAIN`].
///
/// # Examples
/// ```
/// # use haai_catalog::types::domain_from_id;
/// assert_eq!(domain_from_id("3.3.1"), 3);
/// assert_eq!(domain_from_id("x.1"), 0);
/// ```
#[must_use]
pub fn domain_from_id(id: &str) -> u32 {
    id.split('.')
        .next()
        .and_then(|segment| segment.parse().ok())
        .unwrap_or(UNASSIGNED_DOMAIN)
}

/// AI capability status for an activity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Capability {
    /// AI performs the activity reliably today
    Solved,
    /// Close to reliable, remaining gaps are narrow
    NearSolved,
    /// Works for a subset of the activity
    Partial,
    /// Research-stage results only
    Early,
    /// No serious attempt yet
    NotAttempted,
    /// Status string outside the known set, kept verbatim
    Other(String),
}

impl Capability {
    /// Known statuses in report order
    pub const KNOWN: [Capability; 5] = [
        Capability::Solved,
        Capability::NearSolved,
        Capability::Partial,
        Capability::Early,
        Capability::NotAttempted,
    ];

    /// Parse a status string; the empty string means "not assessed"
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let status = match raw {
            "" => return None,
            "solved" => Self::Solved,
            "near_solved" => Self::NearSolved,
            "partial" => Self::Partial,
            "early" => Self::Early,
            "not_attempted" => Self::NotAttempted,
            other => Self::Other(other.to_string()),
        };
        Some(status)
    }

    /// Wire name of the status
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Solved => "solved",
            Self::NearSolved => "near_solved",
            Self::Partial => "partial",
            Self::Early => "early",
            Self::NotAttempted => "not_attempted",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Capability> for String {
    fn from(value: Capability) -> Self {
        value.as_str().to_string()
    }
}

/// Decode an optional capability, treating `null` and `""` alike
pub(crate) fn capability_field<'de, D>(deserializer: D) -> Result<Option<Capability>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Capability::parse))
}

/// Score from a raw integer; `null` and values outside `0..=255` become 0
fn score_or_zero(raw: Option<i64>) -> u8 {
    raw.and_then(|value| u8::try_from(value).ok()).unwrap_or(0)
}

/// Decode one score without failing the enclosing record
///
/// Any integer is accepted so a single bad value costs only its own field.
pub(crate) fn lenient_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(score_or_zero)
}

/// Decode an id -> score table, applying [`lenient_score`] rules per entry
pub(crate) fn lenient_score_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<i64>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(id, value)| (id, score_or_zero(value)))
        .collect())
}

/// `null` decodes as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The seven automation-relevant scores of an activity
///
/// Every field defaults to its zero value; a zero means the score was
/// either genuinely zero or never resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreSet {
    /// Abstraction level
    #[serde(deserialize_with = "lenient_score")]
    pub abstraction: u8,
    /// Tolerance for errors
    #[serde(deserialize_with = "lenient_score")]
    pub error_tolerance: u8,
    /// Speed of feedback on outcomes
    #[serde(deserialize_with = "lenient_score")]
    pub feedback_speed: u8,
    /// Social complexity
    #[serde(deserialize_with = "lenient_score")]
    pub social_complexity: u8,
    /// Purpose level, see [`purpose_name`]
    #[serde(deserialize_with = "lenient_score")]
    pub purpose: u8,
    /// AI capability status
    #[serde(rename = "aiCapability", deserialize_with = "capability_field")]
    pub capability: Option<Capability>,
    /// Bottleneck category (open set, empty when absent)
    #[serde(deserialize_with = "null_as_default")]
    pub bottleneck: String,
    /// AGI wave (1-4)
    #[serde(deserialize_with = "lenient_score")]
    pub agi_wave: u8,
}

impl ScoreSet {
    /// Capability as display text, empty when not assessed
    #[inline]
    #[must_use]
    pub fn capability_str(&self) -> &str {
        self.capability.as_ref().map_or("", Capability::as_str)
    }

    /// Purpose level name
    #[inline]
    #[must_use]
    pub fn purpose_name(&self) -> &'static str {
        purpose_name(self.purpose)
    }
}

/// One taxonomy leaf
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    /// Hierarchical identifier, e.g. `"3.3.1"`
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Explicit owning domain, when the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<u32>,
    /// Category identifier, e.g. `"3.3"`
    pub category_id: String,
    /// Merged scores
    pub scores: ScoreSet,
    /// Example tasks, in source order
    pub example_tasks: Vec<String>,
}

impl Activity {
    /// Owning domain: the explicit id if present, otherwise derived from `id`
    #[inline]
    #[must_use]
    pub fn domain(&self) -> u32 {
        self.domain_id.unwrap_or_else(|| domain_from_id(&self.id))
    }
}
