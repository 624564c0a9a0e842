//! Score merger
//!
//! Resolves the seven score fields of each split-generation activity from
//! their authoritative sources:
//!
//! | Field | Source |
//! |-------|--------|
//! | abstraction | `abstraction` index |
//! | error tolerance | `error-tolerance` index |
//! | purpose | `purpose` index |
//! | feedback speed, social complexity | legacy per-domain files |
//! | capability, bottleneck, AGI wave | latest assessment snapshot |
//!
//! A field whose source is missing, or does not cover the activity, keeps
//! the value already on the record. Each field has exactly one resolution
//! path, so source order never matters.

use crate::artifacts::{AssessmentFile, IndexFile, LegacyDomainFile};
use crate::loaders::{load_index, load_latest_assessment, load_legacy_domains};
use crate::store::ArtifactStore;
use crate::types::Activity;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// The two scores never migrated out of the legacy layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacyScores {
    /// Feedback speed
    pub feedback_speed: u8,
    /// Social complexity
    pub social_complexity: u8,
}

/// Where a group of score fields is resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreSource {
    /// Abstraction index
    Abstraction,
    /// Error-tolerance index
    ErrorTolerance,
    /// Purpose index
    Purpose,
    /// Legacy per-domain files (feedback speed, social complexity)
    Legacy,
    /// Latest assessment (capability, bottleneck, wave)
    Assessment,
}

impl ScoreSource {
    /// All sources in resolution order
    pub const ALL: [ScoreSource; 5] = [
        ScoreSource::Abstraction,
        ScoreSource::ErrorTolerance,
        ScoreSource::Purpose,
        ScoreSource::Legacy,
        ScoreSource::Assessment,
    ];

    /// Fields this source resolves
    #[must_use]
    pub fn fields(self) -> &'static str {
        match self {
            Self::Abstraction => "abstraction",
            Self::ErrorTolerance => "errorTolerance",
            Self::Purpose => "purpose",
            Self::Legacy => "feedbackSpeed, socialComplexity",
            Self::Assessment => "aiCapability, bottleneck, agiWave",
        }
    }
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Abstraction => "abstraction index",
            Self::ErrorTolerance => "error-tolerance index",
            Self::Purpose => "purpose index",
            Self::Legacy => "legacy domain files",
            Self::Assessment => "assessment",
        };
        f.write_str(label)
    }
}

/// Everything the merger reads, loaded once
#[derive(Debug, Clone, Default)]
pub struct MergeSources {
    /// Abstraction index, if loaded
    pub abstraction: Option<IndexFile>,
    /// Error-tolerance index, if loaded
    pub error_tolerance: Option<IndexFile>,
    /// Purpose index, if loaded
    pub purpose: Option<IndexFile>,
    /// Activity id -> legacy feedback speed / social complexity
    pub legacy: HashMap<String, LegacyScores>,
    /// Latest assessment snapshot, if any
    pub assessment: Option<AssessmentFile>,
}

impl MergeSources {
    /// Load every optional source; none of them can fail
    pub fn load<S: ArtifactStore>(store: &S) -> Self {
        let layout = store.layout();
        Self {
            abstraction: load_index(store, &layout.abstraction_index),
            error_tolerance: load_index(store, &layout.error_tolerance_index),
            purpose: load_index(store, &layout.purpose_index),
            legacy: legacy_score_map(&load_legacy_domains(store)),
            assessment: load_latest_assessment(store),
        }
    }

    /// Whether a source contributed anything at all
    #[must_use]
    pub fn is_available(&self, source: ScoreSource) -> bool {
        match source {
            ScoreSource::Abstraction => self.abstraction.is_some(),
            ScoreSource::ErrorTolerance => self.error_tolerance.is_some(),
            ScoreSource::Purpose => self.purpose.is_some(),
            ScoreSource::Legacy => !self.legacy.is_empty(),
            ScoreSource::Assessment => self.assessment.is_some(),
        }
    }
}

/// Extract feedback speed / social complexity from legacy files
///
/// Files are scanned in the order given; a later file overrides an earlier
/// one for the same identifier.
#[must_use]
pub fn legacy_score_map(files: &[LegacyDomainFile]) -> HashMap<String, LegacyScores> {
    files
        .iter()
        .flat_map(|file| &file.activities)
        .map(|activity| {
            let scores = LegacyScores {
                feedback_speed: activity.scores.feedback_speed,
                social_complexity: activity.scores.social_complexity,
            };
            (activity.id.clone(), scores)
        })
        .collect()
}

/// Identifiers each source failed to resolve during a merge
///
/// Output values are unaffected: unresolved fields keep their zero value.
/// The report only makes those gaps visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of activities merged
    pub merged: usize,
    /// Sources that were not loaded at all
    pub unavailable: BTreeSet<ScoreSource>,
    /// Source -> identifiers it did not cover, in catalog order
    pub gaps: BTreeMap<ScoreSource, Vec<String>>,
}

impl MergeReport {
    fn record(&mut self, source: ScoreSource, id: &str) {
        self.gaps.entry(source).or_default().push(id.to_string());
    }

    /// Identifiers left unresolved by `source`
    #[must_use]
    pub fn missing(&self, source: ScoreSource) -> &[String] {
        self.gaps.get(&source).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether every field of every activity was resolved
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.gaps.values().all(Vec::is_empty)
    }
}

fn resolve_from_index(
    field: &mut u8,
    index: Option<&IndexFile>,
    id: &str,
    source: ScoreSource,
    report: &mut MergeReport,
) {
    match index.and_then(|index| index.value(id)) {
        Some(value) => *field = value,
        None => report.record(source, id),
    }
}

/// Resolve the scores of every activity, preserving order and duplicates
#[must_use]
pub fn merge_scores(
    mut activities: Vec<Activity>,
    sources: &MergeSources,
) -> (Vec<Activity>, MergeReport) {
    let mut report = MergeReport {
        merged: activities.len(),
        unavailable: ScoreSource::ALL
            .into_iter()
            .filter(|source| !sources.is_available(*source))
            .collect(),
        gaps: BTreeMap::new(),
    };

    for activity in &mut activities {
        let id = activity.id.as_str();
        let scores = &mut activity.scores;

        resolve_from_index(
            &mut scores.abstraction,
            sources.abstraction.as_ref(),
            id,
            ScoreSource::Abstraction,
            &mut report,
        );
        resolve_from_index(
            &mut scores.error_tolerance,
            sources.error_tolerance.as_ref(),
            id,
            ScoreSource::ErrorTolerance,
            &mut report,
        );
        resolve_from_index(
            &mut scores.purpose,
            sources.purpose.as_ref(),
            id,
            ScoreSource::Purpose,
            &mut report,
        );

        match sources.legacy.get(id) {
            Some(legacy) => {
                scores.feedback_speed = legacy.feedback_speed;
                scores.social_complexity = legacy.social_complexity;
            }
            None => report.record(ScoreSource::Legacy, id),
        }

        match sources
            .assessment
            .as_ref()
            .and_then(|file| file.assessments.get(id))
        {
            Some(judgment) => {
                scores.capability.clone_from(&judgment.capability);
                scores.bottleneck.clone_from(&judgment.bottleneck);
                scores.agi_wave = judgment.agi_wave;
            }
            None => report.record(ScoreSource::Assessment, id),
        }
    }

    for (source, ids) in &report.gaps {
        if !ids.is_empty() {
            tracing::info!(
                source = %source,
                unresolved = ids.len(),
                fields = source.fields(),
                "activities left unscored"
            );
        }
    }

    (activities, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::Assessment;
    use crate::types::{Capability, ScoreSet};
    use pretty_assertions::assert_eq;

    fn activity(id: &str) -> Activity {
        Activity {
            id: id.to_string(),
            ..Activity::default()
        }
    }

    fn index(name: &str, values: &[(&str, u8)]) -> IndexFile {
        IndexFile {
            name: name.to_string(),
            values: values.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            ..IndexFile::default()
        }
    }

    #[test]
    fn index_fields_resolve_only_when_covered() {
        let sources = MergeSources {
            abstraction: Some(index("abstraction", &[("1.1.1", 4)])),
            purpose: Some(index("purpose", &[("1.1.2", 5)])),
            ..MergeSources::default()
        };

        let (merged, report) = merge_scores(vec![activity("1.1.1"), activity("1.1.2")], &sources);

        assert_eq!(merged[0].scores.abstraction, 4);
        assert_eq!(merged[0].scores.purpose, 0);
        assert_eq!(merged[1].scores.abstraction, 0);
        assert_eq!(merged[1].scores.purpose, 5);
        assert_eq!(merged[1].scores.purpose_name(), "Restorative");

        assert_eq!(report.missing(ScoreSource::Abstraction), ["1.1.2".to_string()]);
        assert_eq!(report.missing(ScoreSource::ErrorTolerance).len(), 2);
        assert!(report.unavailable.contains(&ScoreSource::ErrorTolerance));
        assert!(!report.unavailable.contains(&ScoreSource::Abstraction));
    }

    #[test]
    fn uncovered_fields_keep_existing_value() {
        let mut seeded = activity("2.1.1");
        seeded.scores.abstraction = 3;
        seeded.scores.feedback_speed = 1;

        let (merged, _) = merge_scores(vec![seeded], &MergeSources::default());
        assert_eq!(merged[0].scores.abstraction, 3);
        assert_eq!(merged[0].scores.feedback_speed, 1);
    }

    #[test]
    fn legacy_map_supplies_feedback_and_social() {
        let legacy_file = LegacyDomainFile {
            domain_id: 1,
            activities: vec![Activity {
                id: "1.1.1".into(),
                scores: ScoreSet {
                    abstraction: 9,
                    feedback_speed: 2,
                    social_complexity: 3,
                    ..ScoreSet::default()
                },
                ..Activity::default()
            }],
            ..LegacyDomainFile::default()
        };
        let sources = MergeSources {
            legacy: legacy_score_map(&[legacy_file]),
            ..MergeSources::default()
        };

        let (merged, report) = merge_scores(vec![activity("1.1.1"), activity("4.4.4")], &sources);

        assert_eq!(merged[0].scores.feedback_speed, 2);
        assert_eq!(merged[0].scores.social_complexity, 3);
        // legacy abstraction is never consulted in split mode
        assert_eq!(merged[0].scores.abstraction, 0);
        assert_eq!(merged[1].scores.feedback_speed, 0);
        assert_eq!(merged[1].scores.social_complexity, 0);
        assert_eq!(report.missing(ScoreSource::Legacy), ["4.4.4".to_string()]);
    }

    #[test]
    fn later_legacy_file_overrides_earlier() {
        let file = |fs: u8| LegacyDomainFile {
            activities: vec![Activity {
                id: "5.1.1".into(),
                scores: ScoreSet {
                    feedback_speed: fs,
                    ..ScoreSet::default()
                },
                ..Activity::default()
            }],
            ..LegacyDomainFile::default()
        };
        let map = legacy_score_map(&[file(1), file(4)]);
        assert_eq!(map["5.1.1"].feedback_speed, 4);
    }

    #[test]
    fn assessment_resolves_as_triple() {
        let mut assessments = BTreeMap::new();
        assessments.insert(
            "1.1.1".to_string(),
            Assessment {
                capability: Some(Capability::Partial),
                bottleneck: "reasoning".into(),
                agi_wave: 2,
            },
        );
        let sources = MergeSources {
            assessment: Some(AssessmentFile {
                date: "2024-06-01".into(),
                assessments,
            }),
            ..MergeSources::default()
        };

        let (merged, report) = merge_scores(vec![activity("1.1.1"), activity("1.1.9")], &sources);

        assert_eq!(merged[0].scores.capability, Some(Capability::Partial));
        assert_eq!(merged[0].scores.bottleneck, "reasoning");
        assert_eq!(merged[0].scores.agi_wave, 2);
        assert_eq!(merged[1].scores.capability, None);
        assert_eq!(merged[1].scores.bottleneck, "");
        assert_eq!(merged[1].scores.agi_wave, 0);
        assert_eq!(report.missing(ScoreSource::Assessment), ["1.1.9".to_string()]);
    }

    #[test]
    fn duplicates_and_order_are_preserved() {
        let sources = MergeSources {
            abstraction: Some(index("abstraction", &[("1.1.1", 2)])),
            ..MergeSources::default()
        };
        let input = vec![activity("2.1.1"), activity("1.1.1"), activity("1.1.1")];

        let (merged, report) = merge_scores(input, &sources);
        let ids: Vec<&str> = merged.iter().map(|a| a.id.as_str()).collect();

        assert_eq!(ids, vec!["2.1.1", "1.1.1", "1.1.1"]);
        assert_eq!(merged[1].scores.abstraction, 2);
        assert_eq!(merged[2].scores.abstraction, 2);
        assert_eq!(report.merged, 3);
    }

    #[test]
    fn complete_report() {
        let sources = MergeSources {
            abstraction: Some(index("abstraction", &[("1", 1)])),
            error_tolerance: Some(index("error-tolerance", &[("1", 1)])),
            purpose: Some(index("purpose", &[("1", 1)])),
            legacy: HashMap::from([("1".to_string(), LegacyScores::default())]),
            assessment: Some(AssessmentFile {
                date: String::new(),
                assessments: BTreeMap::from([("1".to_string(), Assessment::default())]),
            }),
        };

        let (_, report) = merge_scores(vec![activity("1")], &sources);
        assert!(report.is_complete());
        assert!(report.unavailable.is_empty());
    }

    /// Records the level of every event
    #[derive(Clone, Default)]
    struct LevelLog(std::sync::Arc<std::sync::Mutex<Vec<tracing::Level>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelLog {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn gaps_are_not_logged_as_warnings() {
        use tracing_subscriber::layer::SubscriberExt;

        let log = LevelLog::default();
        let subscriber = tracing_subscriber::registry().with(log.clone());

        let (_, report) = tracing::subscriber::with_default(subscriber, || {
            merge_scores(vec![activity("1.1.1")], &MergeSources::default())
        });

        let levels = log.0.lock().unwrap();
        assert!(!report.is_complete());
        assert!(levels.contains(&tracing::Level::INFO));
        assert!(levels.iter().all(|level| *level > tracing::Level::WARN));
    }
}
