//! Layout patcher.
//!
//! Normalizes navigation and footer across HTML files that were not produced
//! by the generators (hand-written landing pages, older exports), and makes
//! sure each file carries the scripts and styles that navigation needs.
//!
//! ## Rules, applied in order
//!
//! 1. The first `<!-- Navigation -->…</nav>` block, or failing that the first
//!    `<nav…>…</nav>`, becomes the universal navigation.
//! 2. The first `<!-- Footer -->…</footer>` or `<footer…>…</footer>` becomes
//!    the universal footer.
//! 3. Alpine.js is added before `</head>` if the file never mentions it.
//! 4. Dropdown CSS goes before the first `</style>`, or into a new `<style>`
//!    block before `</head>`.
//! 5. Pages using `brand-600` without a Tailwind config get the brand
//!    palette script right after the Tailwind CDN script.
//!
//! The universal blocks come from [`Layout`], so generated pages pass
//! through unchanged. Files are rewritten only when their content changed.

use crate::config::{self, SiteConfig};
use crate::emit;
use crate::templates::{ALPINE_CDN, Layout, NAV_CSS, TAILWIND_CDN};
use crate::types::Procedure;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("invalid patch pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Default)]
pub struct PatchReport {
    pub updated: Vec<PathBuf>,
    pub unchanged: usize,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

pub struct LayoutPatcher {
    nav: String,
    footer: String,
    palette: String,
    marked_nav: Regex,
    any_nav: Regex,
    footer_block: Regex,
    skip_dirs: Vec<String>,
    skip_root_index: bool,
}

impl LayoutPatcher {
    pub fn new(config: &SiteConfig, procedures: &[Procedure]) -> Result<Self, PatchError> {
        let layout = Layout::new(config, procedures);
        Ok(Self {
            nav: layout.universal_nav(),
            footer: layout.universal_footer(),
            palette: config::tailwind_config_script(&config.colors),
            marked_nav: Regex::new(r"(?s)<!-- Navigation -->.*?</nav>")?,
            any_nav: Regex::new(r"(?s)<nav[^>]*>.*?</nav>")?,
            footer_block: Regex::new(
                r"(?s)<!-- Footer -->.*?</footer>|<footer[^>]*>.*?</footer>",
            )?,
            skip_dirs: config.patch.skip_dirs.clone(),
            skip_root_index: config.patch.skip_root_index,
        })
    }

    /// Apply every rule to one document.
    pub fn patch_html(&self, html: &str) -> String {
        let mut out = if self.marked_nav.is_match(html) {
            self.marked_nav.replacen(html, 1, NoExpand(&self.nav)).into_owned()
        } else {
            self.any_nav.replacen(html, 1, NoExpand(&self.nav)).into_owned()
        };
        out = self.footer_block.replacen(&out, 1, NoExpand(&self.footer)).into_owned();

        if !out.to_ascii_lowercase().contains("alpine") {
            let script = format!("    <script defer src=\"{ALPINE_CDN}\"></script>\n</head>");
            out = out.replacen("</head>", &script, 1);
        }

        if !out.contains("nav-dropdown-container") || !out.contains(".nav-dropdown-menu") {
            out = if out.contains("</style>") {
                out.replacen("</style>", &format!("{NAV_CSS}</style>"), 1)
            } else {
                out.replacen("</head>", &format!("    <style>{NAV_CSS}</style>\n</head>"), 1)
            };
        }

        if out.contains("brand-600")
            && !out.contains("brand:")
            && !out.contains("tailwind.config")
        {
            let tag = format!("<script src=\"{TAILWIND_CDN}\"></script>");
            let with_palette = format!("{tag}\n    <script>\n{}\n    </script>", self.palette);
            out = out.replacen(&tag, &with_palette, 1);
        }

        out
    }

    /// Patch every HTML file under `dir`.
    ///
    /// Per-file failures are logged and collected; only an unusable `dir`
    /// fails the run.
    pub fn run(&self, dir: &Path) -> Result<PatchReport, PatchError> {
        if !dir.is_dir() {
            return Err(PatchError::NotADirectory(dir.to_path_buf()));
        }
        let mut report = PatchReport::default();

        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_skipped_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    tracing::warn!(path = %path.display(), error = %e, "cannot walk");
                    report.failed.push((path, e.to_string()));
                    continue;
                }
            };
            let is_html = entry.path().extension().is_some_and(|ext| ext == "html");
            if !entry.file_type().is_file() || !is_html {
                continue;
            }
            if self.skip_root_index && entry.depth() == 1 && entry.file_name() == "index.html" {
                tracing::debug!(path = %entry.path().display(), "root index left as is");
                report.skipped.push(entry.into_path());
                continue;
            }

            let path = entry.into_path();
            match self.patch_file(&path) {
                Ok(true) => {
                    tracing::info!(path = %path.display(), "patched");
                    report.updated.push(path);
                }
                Ok(false) => report.unchanged += 1,
                Err(message) => {
                    tracing::warn!(path = %path.display(), error = %message, "patch failed");
                    report.failed.push((path, message));
                }
            }
        }

        Ok(report)
    }

    fn is_skipped_dir(&self, entry: &walkdir::DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.iter().any(|d| d == name))
    }

    /// `Ok(true)` when the file was rewritten.
    fn patch_file(&self, path: &Path) -> Result<bool, String> {
        let original = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let patched = self.patch_html(&original);
        if patched == original {
            return Ok(false);
        }
        emit::write_file(path, &patched).map_err(|e| e.to_string())?;
        Ok(true)
    }
}
