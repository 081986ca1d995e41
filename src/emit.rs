//! Output paths and file writing.
//!
//! Every generated file lands at a path computed here from slugs, so the
//! links rendered into pages and the files written to disk can never drift
//! apart. Writes create intermediate directories and overwrite whatever was
//! there before.
//!
//! ## Output Layout
//!
//! ```text
//! output/
//! ├── locations/
//! │   ├── index.html
//! │   └── california/
//! │       ├── index.html
//! │       └── palo-alto/
//! │           ├── index.html
//! │           └── stanford-sleep-surgery.html
//! ├── uppp-cost-guide/index.html
//! ├── blog/
//! │   ├── index.html
//! │   └── what-is-uppp/index.html
//! └── faq/index.html
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) -> Result<(), EmitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| EmitError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Remove a directory tree if it exists. A missing directory is not an error.
pub fn clean_dir(path: &Path) -> Result<(), EmitError> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(EmitError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// Site-relative paths. These double as link targets (prefixed with `/`) and
// as output paths (joined onto the output directory).

pub fn locations_index() -> String {
    "locations/index.html".to_string()
}

pub fn state_page(state: &str) -> String {
    format!("locations/{state}/index.html")
}

pub fn city_page(state: &str, city: &str) -> String {
    format!("locations/{state}/{city}/index.html")
}

pub fn provider_page(state: &str, city: &str, provider: &str) -> String {
    format!("locations/{state}/{city}/{provider}.html")
}

pub fn cost_guide_page(procedure_slug: &str) -> String {
    format!("{procedure_slug}/index.html")
}

pub fn blog_index() -> String {
    "blog/index.html".to_string()
}

pub fn blog_post_page(post_slug: &str) -> String {
    format!("blog/{post_slug}/index.html")
}

pub fn faq_page() -> String {
    "faq/index.html".to_string()
}

/// Link URL for a site-relative path: `index.html` is dropped so directory
/// pages link as `/locations/california/`.
pub fn url_for(rel_path: &str) -> String {
    match rel_path.strip_suffix("index.html") {
        Some(dir) => format!("/{dir}"),
        None => format!("/{rel_path}"),
    }
}
