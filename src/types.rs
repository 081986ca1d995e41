//! Shared record types.
//!
//! These types are written to JSON by `ingest` and read back by every page
//! generator, so field names here are the on-disk schema of the `api/`
//! data directory. String fields default to empty when absent.

use serde::{Deserialize, Serialize};

/// Which research table a provider came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    AcademicMedicalCenter,
    IndependentPractice,
}

impl ProviderKind {
    /// Badge text shown on provider pages.
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::AcademicMedicalCenter => "Academic Medical Center",
            ProviderKind::IndependentPractice => "Private Practice",
        }
    }
}

/// A medical practice or clinic rendered as a directory page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub specializations: String,
    pub procedures_offered: String,
    pub inspire_certified: bool,
    pub insurance_accepted: String,

    // Academic medical centers
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_surgeons: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub center_of_excellence: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub research_programs: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub patient_volume: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,

    // Independent practices
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lead_surgeon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notable_achievements: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub patient_reviews: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unique_services: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub practice_type: String,

    pub featured: bool,
    pub verified: bool,
}

impl Provider {
    /// Surgeon line: key surgeons for centers, the lead surgeon for practices.
    pub fn surgeons(&self) -> &str {
        match self.kind {
            ProviderKind::AcademicMedicalCenter => &self.key_surgeons,
            ProviderKind::IndependentPractice => &self.lead_surgeon,
        }
    }

    /// Free-text blurb: notes for centers, notable achievements for practices.
    pub fn about(&self) -> &str {
        match self.kind {
            ProviderKind::AcademicMedicalCenter => &self.notes,
            ProviderKind::IndependentPractice => &self.notable_achievements,
        }
    }
}

/// A `{min, max}` percentage range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRange {
    pub min: u32,
    pub max: u32,
}

impl PercentRange {
    /// `"40-60%"`
    pub fn display(&self) -> String {
        format!("{}-{}%", self.min, self.max)
    }
}

/// Cost range in whole US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: u32,
    pub median: u32,
    pub high: u32,
}

/// A hand-curated surgical procedure, rendered as a cost guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: String,
    pub name: String,
    pub short_name: String,
    /// Output directory of the cost guide, e.g. `uppp-cost-guide`.
    pub slug: String,
    pub category: String,
    pub description: String,
    pub long_description: String,
    pub price_range: PriceRange,
    pub success_rate: PercentRange,
    pub cure_rate: PercentRange,
    pub ahi_reduction: PercentRange,
    pub recovery_time: String,
    pub hospital_stay: String,
    pub work_return: String,
    pub anesthesia: String,
    pub insurance_covered: bool,
    pub cpt_codes: Vec<String>,
    pub best_for: String,
    pub considerations: Vec<String>,
    pub meta_description: String,
}

/// A question/answer pair from the FAQ research table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    /// Comma-separated procedure names.
    pub related_procedures: String,
    /// Citations separated by `", "` or newlines; may embed URLs.
    pub sources: String,
    pub seo_keywords: String,
}

/// A clinical study summary from the research table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Study {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub study_type: String,
    pub sample_size: String,
    pub follow_up: String,
    pub ahi_reduction: String,
    pub success_rate: String,
    pub cure_rate: String,
    pub key_findings: String,
    pub source: String,
}

/// A blog article derived from one FAQ answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub faq_id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_missing_fields_default_to_empty() {
        let p: Provider = serde_json::from_str(r#"{"name": "Sleep Center"}"#).unwrap();
        assert_eq!(p.name, "Sleep Center");
        assert_eq!(p.city, "");
        assert!(!p.inspire_certified);
        assert_eq!(p.kind, ProviderKind::AcademicMedicalCenter);
    }

    #[test]
    fn provider_kind_uses_snake_case_type_field() {
        let p: Provider =
            serde_json::from_str(r#"{"name": "X", "type": "independent_practice"}"#).unwrap();
        assert_eq!(p.kind, ProviderKind::IndependentPractice);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""type":"independent_practice""#));
    }

    #[test]
    fn kind_specific_fields_follow_kind() {
        let mut p = Provider {
            key_surgeons: "Dr. A".into(),
            lead_surgeon: "Dr. B".into(),
            notes: "center notes".into(),
            notable_achievements: "practice wins".into(),
            ..Default::default()
        };
        assert_eq!(p.surgeons(), "Dr. A");
        assert_eq!(p.about(), "center notes");

        p.kind = ProviderKind::IndependentPractice;
        assert_eq!(p.surgeons(), "Dr. B");
        assert_eq!(p.about(), "practice wins");
    }

    #[test]
    fn empty_kind_specific_fields_not_serialized() {
        let p = Provider {
            name: "X".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("lead_surgeon"));
        assert!(json.contains(r#""city":"""#));
    }

    #[test]
    fn percent_range_display() {
        assert_eq!(PercentRange { min: 40, max: 60 }.display(), "40-60%");
    }
}
