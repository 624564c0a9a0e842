//! Testing utilities for HAAI workspace
//!
//! Builds dataset trees in temporary directories.

#![allow(missing_docs)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A dataset root on disk, removed when dropped
pub struct DatasetFixture {
    dir: TempDir,
}

impl DatasetFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write raw text, creating parent directories
    pub fn write_raw(&self, relative: &str, text: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, text).unwrap();
        self
    }

    pub fn write_json(&self, relative: &str, value: &Value) -> &Self {
        self.write_raw(relative, &serde_json::to_string_pretty(value).unwrap())
    }

    pub fn split_activities(&self, activities: Value) -> &Self {
        self.write_json("activities.json", &json!({ "activities": activities }))
    }

    pub fn legacy_domain(&self, domain: u32, activities: Value) -> &Self {
        self.write_json(
            &format!("activities/domain-{domain}.json"),
            &json!({
                "domainId": domain,
                "domainName": format!("Domain {domain}"),
                "activities": activities,
            }),
        )
    }

    pub fn index(&self, name: &str, values: Value) -> &Self {
        self.write_json(
            &format!("indices/{name}.json"),
            &json!({
                "name": name,
                "description": format!("{name} index"),
                "scale": {
                    "min": 1,
                    "max": 5,
                    "levels": [
                        {"level": 1, "name": "Low", "definition": "lowest level"},
                        {"level": 5, "name": "High", "definition": "highest level"}
                    ]
                },
                "values": values,
            }),
        )
    }

    pub fn assessment(&self, file_name: &str, assessments: Value) -> &Self {
        let date = file_name.split('.').next().unwrap_or_default();
        self.write_json(
            &format!("assessments/{file_name}"),
            &json!({ "date": date, "assessments": assessments }),
        )
    }

    pub fn taxonomy(&self, domains: Value) -> &Self {
        self.write_json("taxonomy.json", &json!({ "domains": domains }))
    }

    pub fn mappings(&self, mappings: Value) -> &Self {
        self.write_json("mappings.json", &mappings)
    }
}

impl Default for DatasetFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Legacy activity record with the given scores
pub fn scored_activity(id: &str, name: &str, scores: Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} (fixture)"),
        "categoryId": id.rsplit_once('.').map(|(c, _)| c).unwrap_or_default(),
        "scores": scores,
        "exampleTasks": [format!("{name} task")],
    })
}

/// Split activity record, no scores
pub fn bare_activity(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} (fixture)"),
        "categoryId": id.rsplit_once('.').map(|(c, _)| c).unwrap_or_default(),
        "exampleTasks": [],
    })
}

/// The end-to-end scenario: one split activity `1.1.1` with an abstraction
/// index, a legacy domain-1 file and one assessment
pub fn end_to_end_fixture() -> DatasetFixture {
    let fixture = DatasetFixture::new();
    fixture
        .split_activities(json!([bare_activity("1.1.1", "Assembling furniture")]))
        .index("abstraction", json!({"1.1.1": 4}))
        .legacy_domain(
            1,
            json!([scored_activity(
                "1.1.1",
                "Assembling furniture",
                json!({"abstraction": 1, "feedbackSpeed": 2, "socialComplexity": 3})
            )]),
        )
        .assessment(
            "2024-06-01.json",
            json!({"1.1.1": {"aiCapability": "partial", "bottleneck": "reasoning", "agiWave": 2}}),
        );
    fixture
}
