//! Research CSV → JSON normalization.
//!
//! Reads the research tables from the research directory and writes the
//! normalized data files every page generator consumes:
//!
//! ```text
//! research/                                 api/
//! ├── research_medical_centers.csv    ──►  ├── clinics.json
//! ├── research_independent_clinics.csv     ├── faqs.json
//! ├── research_faqs.csv               ──►  ├── procedures.json   (bundled catalog)
//! └── research_clinical_studies.csv   ──►  ├── studies.json
//!                                          ├── locations.json    (state → city summary)
//!                                          └── data.json         (site stats)
//! ```
//!
//! Ids come from the 1-based row number, so `center-003` is the third data
//! row of its CSV even when an earlier row was skipped for having no name.

use crate::config::SiteConfig;
use crate::emit::{self, EmitError};
use crate::load::{self, LoadError, Row};
use crate::locations::LocationTree;
use crate::naming::slugify;
use crate::types::{Faq, Procedure, Provider, ProviderKind, Study};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MEDICAL_CENTERS_CSV: &str = "research_medical_centers.csv";
pub const INDEPENDENT_CLINICS_CSV: &str = "research_independent_clinics.csv";
pub const FAQS_CSV: &str = "research_faqs.csv";
pub const STUDIES_CSV: &str = "research_clinical_studies.csv";

pub const CLINICS_JSON: &str = "clinics.json";
pub const FAQS_JSON: &str = "faqs.json";
pub const PROCEDURES_JSON: &str = "procedures.json";
pub const STUDIES_JSON: &str = "studies.json";
pub const LOCATIONS_JSON: &str = "locations.json";
pub const DATA_JSON: &str = "data.json";

const SCHEMA_VERSION: &str = "1.0";

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// What an ingest run produced.
#[derive(Debug, Default)]
pub struct IngestSummary {
    pub medical_centers: usize,
    pub independent_clinics: usize,
    pub faqs: usize,
    pub studies: usize,
    pub procedures: usize,
    pub states: usize,
    /// CSV rows dropped for an empty key column, across all tables.
    pub skipped_rows: usize,
    /// Providers left out of `locations.json` (no state/city, or excluded).
    pub unplaced_providers: usize,
    pub files: Vec<PathBuf>,
}

/// Normalize every research CSV in `research_dir` into `data_dir`.
pub fn ingest(
    research_dir: &Path,
    data_dir: &Path,
    config: &SiteConfig,
) -> Result<IngestSummary, IngestError> {
    let center_rows = load::read_csv(&research_dir.join(MEDICAL_CENTERS_CSV))?;
    let clinic_rows = load::read_csv(&research_dir.join(INDEPENDENT_CLINICS_CSV))?;
    let faq_rows = load::read_csv(&research_dir.join(FAQS_CSV))?;
    let study_rows = load::read_csv(&research_dir.join(STUDIES_CSV))?;

    let centers = parse_medical_centers(&center_rows);
    let clinics = parse_independent_clinics(&clinic_rows);
    let faqs = parse_faqs(&faq_rows);
    let studies = parse_studies(&study_rows);
    let procedures = load::bundled_procedures()?;

    let skipped_rows = (center_rows.len() - centers.len())
        + (clinic_rows.len() - clinics.len())
        + (faq_rows.len() - faqs.len())
        + (study_rows.len() - studies.len());
    tracing::debug!(
        centers = centers.len(),
        clinics = clinics.len(),
        faqs = faqs.len(),
        studies = studies.len(),
        skipped_rows,
        "parsed research tables"
    );

    let providers: Vec<Provider> = centers.iter().chain(&clinics).cloned().collect();
    let tree = LocationTree::build(&providers, &config.providers.excluded_states);
    for p in tree.skipped() {
        tracing::warn!(provider = %p.name, state = %p.state, city = %p.city, "no location bucket");
    }

    let published = config.site.published.as_str();
    let clinics_file = json!({
        "meta": {
            "version": SCHEMA_VERSION,
            "generated": published,
            "total_providers": providers.len(),
        },
        "medical_centers": centers,
        "independent_clinics": clinics,
    });
    let data_file = json!({
        "meta": {
            "version": SCHEMA_VERSION,
            "generated": published,
            "site": config.site.domain,
        },
        "stats": {
            "total_providers": providers.len(),
            "medical_centers": centers.len(),
            "independent_clinics": clinics.len(),
            "states_covered": tree.states().count(),
            "procedures": procedures.len(),
            "faqs": faqs.len(),
            "clinical_studies": studies.len(),
        },
        "price_ranges": price_ranges(&procedures),
    });

    let mut summary = IngestSummary {
        medical_centers: centers.len(),
        independent_clinics: clinics.len(),
        faqs: faqs.len(),
        studies: studies.len(),
        procedures: procedures.len(),
        states: tree.states().count(),
        skipped_rows,
        unplaced_providers: tree.skipped().len(),
        files: Vec::new(),
    };

    let outputs: [(&str, Value); 6] = [
        (CLINICS_JSON, clinics_file),
        (PROCEDURES_JSON, json!({ "procedures": procedures })),
        (FAQS_JSON, json!({ "faqs": faqs })),
        (STUDIES_JSON, json!({ "studies": studies })),
        (LOCATIONS_JSON, json!({ "locations": tree.to_index_json() })),
        (DATA_JSON, data_file),
    ];
    for (name, value) in outputs {
        let path = data_dir.join(name);
        write_json(&path, &value)?;
        tracing::debug!(path = %path.display(), "wrote");
        summary.files.push(path);
    }

    Ok(summary)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IngestError> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    emit::write_file(path, &content)?;
    Ok(())
}

/// `{"turbinate_reduction": {"low": 2000, "high": 5000}, ...}`
fn price_ranges(procedures: &[Procedure]) -> Value {
    let ranges: Map<String, Value> = procedures
        .iter()
        .map(|p| {
            (
                p.id.replace('-', "_"),
                json!({ "low": p.price_range.low, "high": p.price_range.high }),
            )
        })
        .collect();
    Value::Object(ranges)
}

/// `center-001`, `faq-012`
fn row_id(prefix: &str, index: usize) -> String {
    format!("{prefix}-{:03}", index + 1)
}

/// Fields shared by both provider tables.
fn base_provider(row: &Row, id: String, name: &str, kind: ProviderKind) -> Provider {
    Provider {
        id,
        name: name.to_string(),
        slug: slugify(name),
        kind,
        city: row.get("City").to_string(),
        state: row.get("State").to_string(),
        address: row.get("Address").to_string(),
        phone: row.get("Phone").to_string(),
        website: row.get("Website").to_string(),
        specializations: row.get("Specializations").to_string(),
        procedures_offered: row.get("Procedures Offered").to_string(),
        inspire_certified: row.flag("Inspire Certified"),
        insurance_accepted: row.get("Insurance Accepted").to_string(),
        verified: true,
        ..Default::default()
    }
}

pub fn parse_medical_centers(rows: &[Row]) -> Vec<Provider> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let name = row.get("Center Name");
            if name.is_empty() {
                return None;
            }
            Some(Provider {
                key_surgeons: row.get("Key Surgeons").to_string(),
                center_of_excellence: row.get("Center of Excellence").to_string(),
                research_programs: row.get("Research Programs").to_string(),
                patient_volume: row.get("Patient Volume").to_string(),
                notes: row.get("Notes").to_string(),
                featured: true,
                ..base_provider(
                    row,
                    row_id("center", i),
                    name,
                    ProviderKind::AcademicMedicalCenter,
                )
            })
        })
        .collect()
}

pub fn parse_independent_clinics(rows: &[Row]) -> Vec<Provider> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let name = row.get("Clinic Name");
            if name.is_empty() {
                return None;
            }
            Some(Provider {
                lead_surgeon: row.get("Lead Surgeon").to_string(),
                notable_achievements: row.get("Notable Achievements").to_string(),
                patient_reviews: row.get("Patient Reviews Summary").to_string(),
                unique_services: row.get("Unique Services").to_string(),
                practice_type: row.get("Practice Type").to_string(),
                featured: false,
                ..base_provider(
                    row,
                    row_id("clinic", i),
                    name,
                    ProviderKind::IndependentPractice,
                )
            })
        })
        .collect()
}

pub fn parse_faqs(rows: &[Row]) -> Vec<Faq> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| !row.get("Question").is_empty())
        .map(|(i, row)| Faq {
            id: row_id("faq", i),
            question: row.get("Question").to_string(),
            answer: row.get("Answer").to_string(),
            category: row.get("Category").to_string(),
            related_procedures: row.get("Related Procedures").to_string(),
            sources: row.get("Sources").to_string(),
            seo_keywords: row.get("SEO Keywords").to_string(),
        })
        .collect()
}

pub fn parse_studies(rows: &[Row]) -> Vec<Study> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| !row.get("Study Name").is_empty())
        .map(|(i, row)| Study {
            id: row_id("study", i),
            name: row.get("Study Name").to_string(),
            study_type: row.get("Study Type").to_string(),
            sample_size: row.get("Sample Size").to_string(),
            follow_up: row.get("Follow-up Duration").to_string(),
            ahi_reduction: row.get("AHI Reduction").to_string(),
            success_rate: row.get("Success Rate").to_string(),
            cure_rate: row.get("Cure Rate").to_string(),
            key_findings: row.get("Key Findings").to_string(),
            source: row.get("Source").to_string(),
        })
        .collect()
}
