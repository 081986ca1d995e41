//! Shared test utilities for the clinic-atlas test suite.
//!
//! Provides fixture setup, record builders and lookup helpers over
//! generation reports.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let report = generate_locations(&tmp.path().join("data"), &out, &config).unwrap();
//!
//! let page = find_page(&report, "locations/california/index.html");
//! assert_eq!(page.title, "California");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::generate::{GenerateReport, GeneratedPage, SkippedRecord};
use crate::naming::slugify;
use crate::types::Provider;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` to a temp directory and return it.
///
/// The copy holds `research/` (CSV exports) and `data/` (normalized JSON).
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Builders
// =========================================================================

/// A provider with only identity and location filled in.
pub fn provider(name: &str, city: &str, state: &str) -> Provider {
    Provider {
        id: slugify(name),
        name: name.to_string(),
        slug: slugify(name),
        city: city.to_string(),
        state: state.to_string(),
        verified: true,
        ..Default::default()
    }
}

// =========================================================================
// Report lookups
// =========================================================================

/// Find a written page by its site-relative path. Panics if not found.
pub fn find_page<'a>(report: &'a GenerateReport, path: &str) -> &'a GeneratedPage {
    report
        .pages
        .iter()
        .find(|p| p.path == path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = report.pages.iter().map(|p| p.path.as_str()).collect();
            panic!("page '{path}' not found. Available: {paths:?}")
        })
}

/// Find a skipped record by name. Panics if not found.
pub fn find_skipped<'a>(report: &'a GenerateReport, name: &str) -> &'a SkippedRecord {
    report
        .skipped
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = report.skipped.iter().map(|s| s.name.as_str()).collect();
            panic!("skipped record '{name}' not found. Available: {names:?}")
        })
}

/// Read a generated file relative to the output directory.
pub fn read_output(output_dir: &Path, rel_path: &str) -> String {
    std::fs::read_to_string(output_dir.join(rel_path))
        .unwrap_or_else(|e| panic!("reading {rel_path}: {e}"))
}
