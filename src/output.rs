//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each generated page
//! leads with its positional index and title, followed by `→` and the
//! site-relative path it was written to. Records that produced no page are
//! listed under the same heading with the reason, so a run doubles as an
//! inventory of what the directory contains and what it left out.
//!
//! # Output Format
//!
//! ## Ingest
//!
//! ```text
//! Research
//!     3 medical centers, 3 independent clinics
//!     3 FAQs, 2 clinical studies, 8 procedures
//!     3 states
//!     Skipped: 2 rows without a name
//!     Unplaced: 2 providers
//!
//! Data files
//!     clinics.json
//!     faqs.json
//!
//! Wrote 6 files to api
//! ```
//!
//! ## Generate
//!
//! ```text
//! Locations
//! 001 All Locations → locations/index.html
//! 002 California → locations/california/index.html
//!     Skipped: Nowhere Sleep Clinic (missing state or city)
//!
//! Generated 2 location pages, 1 skipped
//! ```
//!
//! ## Patch
//!
//! ```text
//! Patched
//!     about/index.html
//!
//! 1 updated, 3 unchanged, 1 skipped, 0 failed
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{GenerateReport, PageKind};
use crate::ingest::IngestSummary;
use crate::naming::count_label;
use crate::patch::PatchReport;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `001 California → locations/california/index.html`
fn page_line(index: usize, title: &str, path: &str) -> String {
    format!("{} {} \u{2192} {}", format_index(index), title, path)
}

/// Path relative to `base` when possible, for display only.
fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).display().to_string()
}

fn page_noun(kind: PageKind) -> (&'static str, &'static str) {
    match kind {
        PageKind::Locations => ("location page", "location pages"),
        PageKind::Providers => ("provider page", "provider pages"),
        PageKind::CostGuides => ("cost guide", "cost guides"),
        PageKind::Blog => ("blog page", "blog pages"),
        PageKind::Faq => ("FAQ page", "FAQ pages"),
    }
}

// ============================================================================
// Ingest
// ============================================================================

pub fn format_ingest_output(summary: &IngestSummary, data_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Research".to_string()];
    lines.push(format!(
        "{}{}, {}",
        indent(1),
        count_label(summary.medical_centers, "medical center", "medical centers"),
        count_label(summary.independent_clinics, "independent clinic", "independent clinics"),
    ));
    lines.push(format!(
        "{}{}, {}, {}",
        indent(1),
        count_label(summary.faqs, "FAQ", "FAQs"),
        count_label(summary.studies, "clinical study", "clinical studies"),
        count_label(summary.procedures, "procedure", "procedures"),
    ));
    lines.push(format!("{}{}", indent(1), count_label(summary.states, "state", "states")));
    if summary.skipped_rows > 0 {
        lines.push(format!(
            "{}Skipped: {} without a name",
            indent(1),
            count_label(summary.skipped_rows, "row", "rows")
        ));
    }
    if summary.unplaced_providers > 0 {
        lines.push(format!(
            "{}Unplaced: {}",
            indent(1),
            count_label(summary.unplaced_providers, "provider", "providers")
        ));
    }

    lines.push(String::new());
    lines.push("Data files".to_string());
    for file in &summary.files {
        lines.push(format!("{}{}", indent(1), display_path(file, data_dir)));
    }

    lines.push(String::new());
    lines.push(format!(
        "Wrote {} to {}",
        count_label(summary.files.len(), "file", "files"),
        data_dir.display()
    ));
    lines
}

pub fn print_ingest_output(summary: &IngestSummary, data_dir: &Path) {
    for line in format_ingest_output(summary, data_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Pages of one generator in write order, then its skipped records.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![report.kind.label().to_string()];
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(page_line(i + 1, &page.title, &page.path));
    }
    for skipped in &report.skipped {
        lines.push(format!("{}Skipped: {} ({})", indent(1), skipped.name, skipped.reason));
    }

    let (singular, plural) = page_noun(report.kind);
    let mut total = format!("Generated {}", count_label(report.pages.len(), singular, plural));
    if !report.skipped.is_empty() {
        total.push_str(&format!(", {} skipped", report.skipped.len()));
    }
    lines.push(String::new());
    lines.push(total);
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

/// Every generator's output, then a grand total.
pub fn format_build_output(reports: &[GenerateReport], output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        lines.extend(format_generate_output(report));
        lines.push(String::new());
    }
    let pages: usize = reports.iter().map(|r| r.pages.len()).sum();
    let skipped: usize = reports.iter().map(|r| r.skipped.len()).sum();
    lines.push(format!(
        "Built {} into {} ({} skipped)",
        count_label(pages, "page", "pages"),
        output_dir.display(),
        skipped
    ));
    lines
}

pub fn print_build_output(reports: &[GenerateReport], output_dir: &Path) {
    for line in format_build_output(reports, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Patch
// ============================================================================

pub fn format_patch_output(report: &PatchReport, dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.updated.is_empty() {
        lines.push("Patched".to_string());
        for path in &report.updated {
            lines.push(format!("{}{}", indent(1), display_path(path, dir)));
        }
        lines.push(String::new());
    }
    if !report.failed.is_empty() {
        lines.push("Failed".to_string());
        for (path, reason) in &report.failed {
            lines.push(format!("{}{}: {}", indent(1), display_path(path, dir), reason));
        }
        lines.push(String::new());
    }
    lines.push(format!(
        "{} updated, {} unchanged, {} skipped, {} failed",
        report.updated.len(),
        report.unchanged,
        report.skipped.len(),
        report.failed.len()
    ));
    lines
}

pub fn print_patch_output(report: &PatchReport, dir: &Path) {
    for line in format_patch_output(report, dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{GeneratedPage, SkippedRecord};
    use std::path::PathBuf;

    fn page(title: &str, path: &str) -> GeneratedPage {
        GeneratedPage {
            title: title.to_string(),
            path: path.to_string(),
        }
    }

    fn locations_report() -> GenerateReport {
        GenerateReport {
            kind: PageKind::Locations,
            pages: vec![
                page("All Locations", "locations/index.html"),
                page("California", "locations/california/index.html"),
            ],
            skipped: vec![SkippedRecord {
                name: "Nowhere Sleep Clinic".to_string(),
                reason: "missing state or city".to_string(),
            }],
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn page_line_shows_title_then_path() {
        assert_eq!(
            page_line(2, "California", "locations/california/index.html"),
            "002 California \u{2192} locations/california/index.html"
        );
    }

    #[test]
    fn generate_output_lists_pages_and_skips() {
        let lines = format_generate_output(&locations_report());
        assert_eq!(
            lines,
            vec![
                "Locations",
                "001 All Locations \u{2192} locations/index.html",
                "002 California \u{2192} locations/california/index.html",
                "    Skipped: Nowhere Sleep Clinic (missing state or city)",
                "",
                "Generated 2 location pages, 1 skipped",
            ]
        );
    }

    #[test]
    fn generate_output_singular_without_skips() {
        let report = GenerateReport {
            kind: PageKind::Faq,
            pages: vec![page("FAQ", "faq/index.html")],
            skipped: Vec::new(),
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines.last().unwrap(), "Generated 1 FAQ page");
    }

    #[test]
    fn build_output_totals_every_report() {
        let faq = GenerateReport {
            kind: PageKind::Faq,
            pages: vec![page("FAQ", "faq/index.html")],
            skipped: Vec::new(),
        };
        let lines = format_build_output(&[locations_report(), faq], Path::new("site"));
        assert_eq!(lines.last().unwrap(), "Built 3 pages into site (1 skipped)");
        assert!(lines.contains(&"FAQ".to_string()));
    }

    #[test]
    fn ingest_output_relative_file_names() {
        let summary = IngestSummary {
            medical_centers: 3,
            independent_clinics: 1,
            faqs: 3,
            studies: 2,
            procedures: 8,
            states: 3,
            skipped_rows: 2,
            unplaced_providers: 0,
            files: vec![PathBuf::from("api/clinics.json"), PathBuf::from("api/faqs.json")],
        };
        let lines = format_ingest_output(&summary, Path::new("api"));
        assert_eq!(lines[1], "    3 medical centers, 1 independent clinic");
        assert_eq!(lines[2], "    3 FAQs, 2 clinical studies, 8 procedures");
        assert!(lines.contains(&"    Skipped: 2 rows without a name".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Unplaced")));
        assert!(lines.contains(&"    clinics.json".to_string()));
        assert_eq!(lines.last().unwrap(), "Wrote 2 files to api");
    }

    #[test]
    fn patch_output_sections_only_when_non_empty() {
        let report = PatchReport {
            updated: vec![PathBuf::from("site/about/index.html")],
            unchanged: 3,
            skipped: vec![PathBuf::from("site/index.html")],
            failed: Vec::new(),
        };
        let lines = format_patch_output(&report, Path::new("site"));
        assert_eq!(
            lines,
            vec![
                "Patched",
                "    about/index.html",
                "",
                "1 updated, 3 unchanged, 1 skipped, 0 failed",
            ]
        );
    }

    #[test]
    fn patch_output_lists_failures() {
        let report = PatchReport {
            failed: vec![(PathBuf::from("site/bad.html"), "invalid UTF-8".to_string())],
            ..Default::default()
        };
        let lines = format_patch_output(&report, Path::new("site"));
        assert_eq!(lines[0], "Failed");
        assert_eq!(lines[1], "    bad.html: invalid UTF-8");
    }
}
