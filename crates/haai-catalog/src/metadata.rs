//! Static reference metadata
//!
//! Domains, categories, ATUS time-use mappings and economic impact figures.
//! None of this takes part in score resolution; it is decoded verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// AGI-wave estimate of a domain: one wave or a span of waves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgiWaveEstimate {
    /// A single wave
    Single(u8),
    /// A span of waves, e.g. `[2, 3]`
    Range(Vec<u8>),
}

impl fmt::Display for AgiWaveEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(wave) => write!(f, "{wave}"),
            Self::Range(waves) => {
                for (i, wave) in waves.iter().enumerate() {
                    if i > 0 {
                        f.write_str("-")?;
                    }
                    write!(f, "{wave}")?;
                }
                Ok(())
            }
        }
    }
}

/// Category within a domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Category id, e.g. `"3.3"`
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
}

/// Top-level activity domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Domain {
    /// Domain number (1-10)
    pub id: u32,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Abstraction score of the domain as a whole
    pub abstraction_score: u8,
    /// Estimated AGI wave
    pub estimated_agi_wave: Option<AgiWaveEstimate>,
    /// Kind of AI system expected to automate the domain
    pub primary_ai_system_type: String,
    /// Categories in listing order
    pub categories: Vec<Category>,
}

impl Domain {
    /// Wave estimate as display text, empty when absent
    #[must_use]
    pub fn wave_label(&self) -> String {
        self.estimated_agi_wave
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// `taxonomy.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    /// Domains ordered by abstraction level
    pub domains: Vec<Domain>,
}

impl Taxonomy {
    /// Look up a domain by number
    #[must_use]
    pub fn domain(&self, id: u32) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }
}

/// One ATUS category mapped onto taxonomy categories
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtusEntry {
    /// ATUS code
    pub atus_code: String,
    /// ATUS category name
    pub atus_category: String,
    /// Taxonomy category ids covered
    pub haai_categories: Vec<String>,
    /// Mapping notes
    pub notes: String,
    /// Average minutes per day
    pub avg_minutes_per_day: u32,
    /// Fraction of the population participating (0.0-1.0)
    pub participation_rate: f64,
    /// Optional sub-category minutes
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub breakdown: BTreeMap<String, u32>,
}

/// Daily time summary in minutes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtusSummary {
    /// Should add up to 1440
    pub total_minutes_per_day: u32,
    /// Sleep and personal care
    pub sleep_and_personal_care: u32,
    /// Work
    pub work: u32,
    /// Leisure
    pub leisure: u32,
    /// Household and care
    pub household_and_care: u32,
    /// Travel
    pub travel: u32,
    /// Everything else
    pub other: u32,
}

/// ATUS time-use mapping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtusMapping {
    /// Survey source
    pub data_source: String,
    /// Unit of the minute figures
    pub time_unit: String,
    /// Entries in listing order
    pub mappings: Vec<AtusEntry>,
    /// Daily summary
    pub summary: AtusSummary,
}

/// US labor market totals
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsLaborMarket {
    /// Total employed workers
    pub total_employment: u64,
    /// Total annual wages
    pub total_wages: u64,
    /// Average hourly wage
    pub average_hourly_wage: f64,
}

/// Economic figures for one domain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainEconomic {
    /// Domain number
    pub domain_id: u32,
    /// Domain name
    pub domain_name: String,
    /// Estimated workers
    pub estimated_workers: u64,
    /// Share of the workforce in percent
    pub percent_of_workforce: f64,
    /// Median hourly wage, when known
    pub median_hourly_wage: Option<f64>,
    /// Annual value in billions
    pub annual_value_billions: u64,
    /// Qualitative automation exposure
    pub automation_exposure: String,
    /// Sample occupations
    pub sample_occupations: Vec<String>,
    /// Notes
    pub notes: String,
}

/// Economic impact by domain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EconomicImpact {
    /// Free-text description
    pub description: String,
    /// Currency of monetary figures
    pub currency: String,
    /// Reference year
    pub year: u32,
    /// National totals
    pub us_labor_market: UsLaborMarket,
    /// Per-domain figures
    pub domain_economics: Vec<DomainEconomic>,
}

/// `mappings.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mappings {
    /// ATUS time-use mapping
    pub atus_mapping: AtusMapping,
    /// Economic impact
    pub economic_impact: EconomicImpact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_estimate_formats() {
        assert_eq!(AgiWaveEstimate::Single(2).to_string(), "2");
        assert_eq!(AgiWaveEstimate::Range(vec![2, 3]).to_string(), "2-3");
        assert_eq!(AgiWaveEstimate::Range(vec![1, 2, 4]).to_string(), "1-2-4");
    }

    #[test]
    fn wave_estimate_decodes_both_shapes() {
        let single: AgiWaveEstimate = serde_json::from_str("3").unwrap();
        let range: AgiWaveEstimate = serde_json::from_str("[3, 4]").unwrap();

        assert_eq!(single, AgiWaveEstimate::Single(3));
        assert_eq!(range, AgiWaveEstimate::Range(vec![3, 4]));
    }

    #[test]
    fn taxonomy_lookup() {
        let taxonomy: Taxonomy = serde_json::from_str(
            r#"{"domains": [
                {"id": 1, "name": "Physical", "abstractionScore": 1, "estimatedAgiWave": [3, 4],
                 "primaryAiSystemType": "robotics",
                 "categories": [{"id": "1.1", "name": "Manipulation"}]},
                {"id": 2, "name": "Symbolic", "estimatedAgiWave": 1}
            ]}"#,
        )
        .unwrap();

        let physical = taxonomy.domain(1).unwrap();
        assert_eq!(physical.wave_label(), "3-4");
        assert_eq!(physical.primary_ai_system_type, "robotics");
        assert_eq!(physical.categories[0].name, "Manipulation");
        assert_eq!(taxonomy.domain(2).unwrap().wave_label(), "1");
        assert!(taxonomy.domain(3).is_none());
    }

    #[test]
    fn mappings_decode() {
        let mappings: Mappings = serde_json::from_str(
            r#"{
                "atusMapping": {
                    "dataSource": "ATUS 2023",
                    "mappings": [{"atusCode": "01", "atusCategory": "Personal care",
                                  "haaiCategories": ["1.1"], "avgMinutesPerDay": 580,
                                  "participationRate": 1.0}],
                    "summary": {"totalMinutesPerDay": 1440, "work": 210}
                },
                "economicImpact": {
                    "currency": "USD",
                    "year": 2024,
                    "usLaborMarket": {"totalEmployment": 161000000},
                    "domainEconomics": [{"domainId": 1, "medianHourlyWage": null}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(mappings.atus_mapping.mappings[0].atus_code, "01");
        assert_eq!(mappings.atus_mapping.summary.work, 210);
        assert_eq!(mappings.economic_impact.us_labor_market.total_employment, 161_000_000);
        assert_eq!(mappings.economic_impact.domain_economics[0].median_hourly_wage, None);
    }
}
