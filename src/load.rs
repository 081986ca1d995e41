//! Record loading.
//!
//! Reads the two kinds of input the generators consume:
//!
//! - **Research CSVs** (`research/*.csv`): header-keyed rows, read into
//!   [`Row`]s whose missing columns read as empty strings.
//! - **Data JSON** (`api/*.json`): the normalized files written by `ingest`,
//!   deserialized straight into [`crate::types`] records.
//!
//! The procedure catalog and the blog post list are hand-curated and bundled
//! into the binary from `static/`.
//!
//! Any missing or malformed file aborts the run; there is no partial load.

use crate::types::{BlogPost, Faq, Procedure, Provider, ProviderKind};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROCEDURES_JSON: &str = include_str!("../static/procedures.json");
const BLOG_POSTS_JSON: &str = include_str!("../static/blog_posts.json");

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("bundled {name} catalog is invalid: {source}")]
    Bundled {
        name: &'static str,
        source: serde_json::Error,
    },
}

/// One CSV row keyed by header name. Values are trimmed.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Column value, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// `Yes`/`yes` columns read as `true`; anything else is `false`.
    pub fn flag(&self, column: &str) -> bool {
        self.get(column).eq_ignore_ascii_case("yes")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read a headed CSV file into rows.
///
/// Rows shorter than the header are accepted; their trailing columns read
/// as empty. A UTF-8 byte-order mark on the first header is ignored.
pub fn read_csv(path: &Path) -> Result<Vec<Row>, LoadError> {
    let file = fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.as_str(), v))
                .collect(),
        );
    }
    Ok(rows)
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Deserialize)]
struct ClinicsFile {
    #[serde(default)]
    medical_centers: Vec<Provider>,
    #[serde(default)]
    independent_clinics: Vec<Provider>,
}

#[derive(Deserialize)]
struct FaqsFile {
    faqs: Vec<Faq>,
}

#[derive(Deserialize)]
struct ProceduresFile {
    procedures: Vec<Procedure>,
}

/// Load every provider from `clinics.json`: medical centers first, then
/// independent clinics, each in file order.
///
/// The provider kind is taken from the array a record sits in, whatever its
/// own `type` field says.
pub fn load_providers(path: &Path) -> Result<Vec<Provider>, LoadError> {
    let file: ClinicsFile = read_json(path)?;
    let centers = file.medical_centers.into_iter().map(|mut p| {
        p.kind = ProviderKind::AcademicMedicalCenter;
        p
    });
    let clinics = file.independent_clinics.into_iter().map(|mut p| {
        p.kind = ProviderKind::IndependentPractice;
        p
    });
    Ok(centers.chain(clinics).collect())
}

/// Load the FAQ list from `faqs.json`.
pub fn load_faqs(path: &Path) -> Result<Vec<Faq>, LoadError> {
    let file: FaqsFile = read_json(path)?;
    Ok(file.faqs)
}

/// The bundled procedure catalog, in display order.
pub fn bundled_procedures() -> Result<Vec<Procedure>, LoadError> {
    let file: ProceduresFile =
        serde_json::from_str(PROCEDURES_JSON).map_err(|source| LoadError::Bundled {
            name: "procedure",
            source,
        })?;
    Ok(file.procedures)
}

/// The bundled blog post list, in display order.
pub fn bundled_blog_posts() -> Result<Vec<BlogPost>, LoadError> {
    serde_json::from_str(BLOG_POSTS_JSON).map_err(|source| LoadError::Bundled {
        name: "blog post",
        source,
    })
}
