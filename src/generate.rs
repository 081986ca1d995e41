//! Page generation.
//!
//! One generator per page type. Each loads its own inputs, renders through
//! [`crate::pages`] and writes through [`crate::emit`], returning a
//! [`GenerateReport`] of what was written and what was skipped.
//!
//! ## Generators
//!
//! - **Locations** (`locations/**/index.html`): removes `locations/` first,
//!   then writes the state list, every state page and every city page
//! - **Providers** (`locations/<state>/<city>/<provider>.html`)
//! - **Cost guides** (`<procedure>-cost-guide/index.html`): from the bundled
//!   procedure catalog
//! - **Blog** (`blog/index.html`, `blog/<post>/index.html`): one post per
//!   catalog entry whose FAQ exists
//! - **FAQ** (`faq/index.html`)
//!
//! [`generate_all`] runs them in that order. Locations must come before
//! providers because it clears the directory provider pages live in.
//!
//! ## Inputs
//!
//! ```text
//! api/
//! ├── clinics.json     # providers, locations
//! └── faqs.json        # blog, faq
//! ```
//!
//! Missing or malformed inputs abort the generator. Records that cannot be
//! placed (a provider without a city, a blog post whose FAQ is gone) are
//! logged, skipped and listed in the report.

use crate::config::SiteConfig;
use crate::emit::{self, EmitError};
use crate::ingest::{CLINICS_JSON, FAQS_JSON};
use crate::load::{self, LoadError};
use crate::locations::LocationTree;
use crate::pages::{blog, cost_guide, faq, location, provider};
use crate::templates::Layout;
use crate::types::{Faq, Procedure, Provider};
use maud::Markup;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Locations,
    Providers,
    CostGuides,
    Blog,
    Faq,
}

impl PageKind {
    pub fn label(self) -> &'static str {
        match self {
            PageKind::Locations => "Locations",
            PageKind::Providers => "Providers",
            PageKind::CostGuides => "Cost guides",
            PageKind::Blog => "Blog",
            PageKind::Faq => "FAQ",
        }
    }
}

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub title: String,
    /// Site-relative output path.
    pub path: String,
}

/// A record that produced no page.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub kind: PageKind,
    pub pages: Vec<GeneratedPage>,
    pub skipped: Vec<SkippedRecord>,
}

impl GenerateReport {
    fn new(kind: PageKind) -> Self {
        Self {
            kind,
            pages: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Write one page. A later page with the same path overwrites the file
    /// and replaces the earlier entry, so `pages` lists each file once.
    fn write(
        &mut self,
        output_dir: &Path,
        rel_path: String,
        title: &str,
        page: Markup,
    ) -> Result<(), EmitError> {
        emit::write_file(&output_dir.join(&rel_path), &page.into_string())?;
        let page = GeneratedPage {
            title: title.to_string(),
            path: rel_path,
        };
        match self.pages.iter_mut().find(|p| p.path == page.path) {
            Some(earlier) => {
                tracing::debug!(path = %page.path, earlier = %earlier.title, "overwrote page");
                *earlier = page;
            }
            None => {
                tracing::debug!(path = %page.path, "wrote page");
                self.pages.push(page);
            }
        }
        Ok(())
    }

    fn skip(&mut self, name: &str, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(record = %name, %reason, "skipped");
        self.skipped.push(SkippedRecord {
            name: name.to_string(),
            reason,
        });
    }
}

fn procedures() -> Result<Vec<Procedure>, GenerateError> {
    Ok(load::bundled_procedures()?)
}

/// Location hierarchy: the state list, state pages and city pages.
pub fn generate_locations(
    data_dir: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    let providers = load::load_providers(&data_dir.join(CLINICS_JSON))?;
    let procedures = procedures()?;
    let layout = Layout::new(config, &procedures);
    let tree = LocationTree::build(&providers, &config.providers.excluded_states);
    let mut report = GenerateReport::new(PageKind::Locations);

    emit::clean_dir(&output_dir.join("locations"))?;

    report.write(
        output_dir,
        emit::locations_index(),
        "All Locations",
        location::render_index(&layout, &tree),
    )?;
    for state in tree.states() {
        report.write(
            output_dir,
            emit::state_page(&state.slug),
            &state.name,
            location::render_state(&layout, state),
        )?;
        for city in state.cities() {
            report.write(
                output_dir,
                emit::city_page(&state.slug, &city.slug),
                &format!("{}, {}", city.name, state.name),
                location::render_city(&layout, state, city),
            )?;
        }
    }
    for p in tree.skipped() {
        report.skip(record_label(p), unplaced_reason(p));
    }

    tracing::info!(
        states = tree.states().count(),
        cities = tree.city_count(),
        "location pages generated"
    );
    Ok(report)
}

/// Name of a provider in the skipped list; the id when the name is blank.
fn record_label(provider: &Provider) -> &str {
    if provider.name.trim().is_empty() {
        &provider.id
    } else {
        &provider.name
    }
}

fn unplaced_reason(provider: &Provider) -> String {
    if provider.name.trim().is_empty() {
        "missing name".to_string()
    } else if provider.state.trim().is_empty() || provider.city.trim().is_empty() {
        "missing state or city".to_string()
    } else {
        format!("state {:?} is excluded", provider.state)
    }
}

/// One detail page per placed provider.
pub fn generate_providers(
    data_dir: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    let providers = load::load_providers(&data_dir.join(CLINICS_JSON))?;
    let procedures = procedures()?;
    let layout = Layout::new(config, &procedures);
    let tree = LocationTree::build(&providers, &config.providers.excluded_states);
    let mut report = GenerateReport::new(PageKind::Providers);

    for state in tree.states() {
        for city in state.cities() {
            for p in &city.providers {
                report.write(
                    output_dir,
                    provider::page_path(state, city, p),
                    &p.name,
                    provider::render(&layout, state, city, p),
                )?;
            }
        }
    }
    for p in tree.skipped() {
        report.skip(record_label(p), unplaced_reason(p));
    }

    tracing::info!(pages = report.pages.len(), "provider pages generated");
    Ok(report)
}

/// One cost guide per catalog procedure.
pub fn generate_cost_guides(
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    let procedures = procedures()?;
    let layout = Layout::new(config, &procedures);
    let mut report = GenerateReport::new(PageKind::CostGuides);

    for p in &procedures {
        report.write(
            output_dir,
            emit::cost_guide_page(&p.slug),
            &format!("{} Cost Guide", p.short_name),
            cost_guide::render(&layout, p),
        )?;
    }

    tracing::info!(pages = report.pages.len(), "cost guides generated");
    Ok(report)
}

/// Blog posts for every catalog entry with a matching FAQ, then the index.
pub fn generate_blog(
    data_dir: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    let faqs = load::load_faqs(&data_dir.join(FAQS_JSON))?;
    let posts = load::bundled_blog_posts()?;
    let procedures = procedures()?;
    let layout = Layout::new(config, &procedures);
    let mut report = GenerateReport::new(PageKind::Blog);

    let by_id: HashMap<&str, &Faq> = faqs.iter().map(|f| (f.id.as_str(), f)).collect();
    let mut entries = Vec::new();
    for post in &posts {
        match by_id.get(post.faq_id.as_str()) {
            Some(faq) => entries.push((post, *faq)),
            None => report.skip(&post.title, format!("FAQ {} not found", post.faq_id)),
        }
    }

    for (post, faq) in &entries {
        report.write(
            output_dir,
            emit::blog_post_page(&post.slug),
            &post.title,
            blog::render_post(&layout, post, faq),
        )?;
    }
    report.write(
        output_dir,
        emit::blog_index(),
        "Blog",
        blog::render_index(&layout, &entries),
    )?;

    tracing::info!(posts = entries.len(), "blog generated");
    Ok(report)
}

/// The single FAQ page.
pub fn generate_faq(
    data_dir: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    let faqs = load::load_faqs(&data_dir.join(FAQS_JSON))?;
    let procedures = procedures()?;
    let layout = Layout::new(config, &procedures);
    let mut report = GenerateReport::new(PageKind::Faq);

    report.write(output_dir, emit::faq_page(), "FAQ", faq::render(&layout, &faqs))?;

    tracing::info!(questions = faqs.len(), "faq page generated");
    Ok(report)
}

/// Every generator, locations first.
pub fn generate_all(
    data_dir: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<Vec<GenerateReport>, GenerateError> {
    Ok(vec![
        generate_locations(data_dir, output_dir, config)?,
        generate_providers(data_dir, output_dir, config)?,
        generate_cost_guides(output_dir, config)?,
        generate_blog(data_dir, output_dir, config)?,
        generate_faq(data_dir, output_dir, config)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{find_page, find_skipped, read_output, setup_fixtures};
    use std::fs;

    fn dirs(tmp: &tempfile::TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
        (tmp.path().join("data"), tmp.path().join("site"))
    }

    #[test]
    fn locations_writes_index_state_and_city_pages() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        let report = generate_locations(&data, &out, &SiteConfig::default()).unwrap();

        find_page(&report, "locations/index.html");
        find_page(&report, "locations/california/index.html");
        find_page(&report, "locations/california/palo-alto/index.html");
        find_page(&report, "locations/california/los-angeles/index.html");
        assert!(out.join("locations/texas/austin/index.html").exists());
    }

    #[test]
    fn locations_clears_stale_pages() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        let stale = out.join("locations/atlantis/index.html");
        emit::write_file(&stale, "old").unwrap();
        generate_locations(&data, &out, &SiteConfig::default()).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn locations_reports_unplaced_providers() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        let report = generate_locations(&data, &out, &SiteConfig::default()).unwrap();
        let skipped = find_skipped(&report, "Nowhere Sleep Clinic");
        assert_eq!(skipped.reason, "missing state or city");
        let intl = find_skipped(&report, "Singapore Airway Centre");
        assert!(intl.reason.contains("excluded"));
    }

    #[test]
    fn providers_write_one_page_per_placed_provider() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        let report = generate_providers(&data, &out, &SiteConfig::default()).unwrap();
        let page = find_page(&report, "locations/california/palo-alto/stanford-sleep-surgery.html");
        assert_eq!(page.title, "Stanford Sleep Surgery");
        assert!(
            read_output(&out, "locations/california/palo-alto/stanford-sleep-surgery.html")
                .contains("Stanford Sleep Surgery")
        );
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn city_page_card_counts() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        generate_locations(&data, &out, &SiteConfig::default()).unwrap();
        let palo_alto = read_output(&out, "locations/california/palo-alto/index.html");
        let los_angeles = read_output(&out, "locations/california/los-angeles/index.html");
        assert_eq!(palo_alto.matches("provider-card").count(), 2);
        assert_eq!(los_angeles.matches("provider-card").count(), 1);
    }

    #[test]
    fn city_cards_link_to_written_provider_pages() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        generate_locations(&data, &out, &SiteConfig::default()).unwrap();
        let providers = generate_providers(&data, &out, &SiteConfig::default()).unwrap();
        let city = read_output(&out, "locations/california/palo-alto/index.html");
        let in_palo_alto = providers
            .pages
            .iter()
            .filter(|p| p.path.starts_with("locations/california/palo-alto/"));
        for page in in_palo_alto {
            let href = format!("href=\"/{}\"", page.path);
            assert!(city.contains(&href), "no card for {}", page.path);
        }
    }

    #[test]
    fn locations_twice_is_byte_identical() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        let config = SiteConfig::default();
        let first = generate_locations(&data, &out, &config).unwrap();
        let before: Vec<String> = first.pages.iter().map(|p| read_output(&out, &p.path)).collect();
        let second = generate_locations(&data, &out, &config).unwrap();
        assert_eq!(first, second);
        let after: Vec<String> = second.pages.iter().map(|p| read_output(&out, &p.path)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn cost_guides_cover_catalog() {
        let tmp = setup_fixtures();
        let (_, out) = dirs(&tmp);
        let report = generate_cost_guides(&out, &SiteConfig::default()).unwrap();
        assert_eq!(report.pages.len(), 8);
        find_page(&report, "inspire-cost-guide/index.html");
        find_page(&report, "genioglossus-advancement-cost-guide/index.html");
    }

    #[test]
    fn blog_skips_posts_without_faq() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        let report = generate_blog(&data, &out, &SiteConfig::default()).unwrap();

        find_page(&report, "blog/index.html");
        find_page(&report, "blog/sleep-apnea-surgery-insurance-coverage/index.html");
        assert!(!report.skipped.is_empty());
        assert!(report.skipped.iter().all(|s| s.reason.contains("not found")));
        // Index links only to posts that were written.
        let index = read_output(&out, "blog/index.html");
        assert_eq!(index.matches("post-card").count(), report.pages.len() - 1);
    }

    #[test]
    fn faq_page_lists_every_question() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        let report = generate_faq(&data, &out, &SiteConfig::default()).unwrap();
        assert_eq!(report.pages.len(), 1);
        let faqs = load::load_faqs(&data.join(FAQS_JSON)).unwrap();
        let html = read_output(&out, "faq/index.html");
        assert_eq!(html.matches("<details").count(), faqs.len());
    }

    fn write_clinics(data: &Path, clinics: serde_json::Value) {
        let file = serde_json::json!({ "independent_clinics": clinics });
        emit::write_file(&data.join(CLINICS_JSON), &file.to_string()).unwrap();
    }

    #[test]
    fn unsluggable_names_get_distinct_visible_pages() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        write_clinics(
            &data,
            serde_json::json!([
                { "id": "clinic-001", "name": "", "city": "Austin", "state": "Texas" },
                { "id": "clinic-002", "name": "!!!", "city": "Austin", "state": "Texas" },
                { "id": "clinic-003", "name": "睡眠クリニック", "city": "Austin", "state": "Texas" },
            ]),
        );
        let config = SiteConfig::default();
        generate_locations(&data, &out, &config).unwrap();
        let report = generate_providers(&data, &out, &config).unwrap();

        let paths: Vec<&str> = report.pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "locations/texas/austin/clinic-002.html",
                "locations/texas/austin/clinic-003.html"
            ]
        );
        assert_eq!(find_skipped(&report, "clinic-001").reason, "missing name");
        assert!(!out.join("locations/texas/austin/.html").exists());

        let city = read_output(&out, "locations/texas/austin/index.html");
        assert_eq!(city.matches("provider-card").count(), 2);
        for path in paths {
            assert!(city.contains(&format!("href=\"/{path}\"")), "no card for {path}");
        }
    }

    #[test]
    fn non_ascii_city_is_placed() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        write_clinics(
            &data,
            serde_json::json!([
                {
                    "id": "clinic-001",
                    "name": "Tokyo Sleep Clinic",
                    "city": "東京",
                    "state": "Tokyo",
                },
            ]),
        );
        let config = SiteConfig::default();
        let locations = generate_locations(&data, &out, &config).unwrap();
        let providers = generate_providers(&data, &out, &config).unwrap();

        assert!(locations.skipped.is_empty());
        let city = find_page(&locations, "locations/tokyo/u6771-u4eac/index.html");
        assert_eq!(city.title, "東京, Tokyo");
        find_page(&providers, "locations/tokyo/u6771-u4eac/tokyo-sleep-clinic.html");
    }

    #[test]
    fn same_path_providers_overwrite_and_count_once() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        write_clinics(
            &data,
            serde_json::json!([
                {
                    "name": "Austin Airway Center",
                    "city": "Austin",
                    "state": "Texas",
                    "phone": "(512) 555-0001",
                },
                {
                    "name": "Austin Airway Center",
                    "city": "Austin",
                    "state": "Texas",
                    "phone": "(512) 555-0002",
                },
            ]),
        );
        let report = generate_providers(&data, &out, &SiteConfig::default()).unwrap();

        assert_eq!(report.pages.len(), 1);
        let html = read_output(&out, "locations/texas/austin/austin-airway-center.html");
        assert!(html.contains("(512) 555-0002"));
        assert!(!html.contains("(512) 555-0001"));
    }

    #[test]
    fn missing_data_file_aborts() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = generate_providers(tmp.path(), &tmp.path().join("site"), &SiteConfig::default())
            .unwrap_err();
        assert!(matches!(err, GenerateError::Load(LoadError::Io { .. })));
    }

    #[test]
    fn generate_all_runs_in_order_and_keeps_provider_pages() {
        let tmp = setup_fixtures();
        let (data, out) = dirs(&tmp);
        let reports = generate_all(&data, &out, &SiteConfig::default()).unwrap();
        let kinds: Vec<PageKind> = reports.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PageKind::Locations,
                PageKind::Providers,
                PageKind::CostGuides,
                PageKind::Blog,
                PageKind::Faq
            ]
        );
        let stanford = out.join("locations/california/palo-alto/stanford-sleep-surgery.html");
        assert!(fs::metadata(stanford).is_ok());
    }
}
