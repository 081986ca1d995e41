//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` in the project root (`--root`).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "SleepApneaMatch"
//! domain = "SleepApneaMatch.com"  # shown after page titles
//! base_url = "https://sleepapneamatch.com"
//! tagline = "Compare sleep apnea surgery costs and find verified providers."
//! published = "2026-01-10"   # datePublished in JSON-LD, `generated` in data files
//! copyright_year = 2026
//!
//! [reviewer]
//! name = "Dr. Igor I. Bussel, MD"
//! title = "Board-Certified Physician"
//! photo = "/assets/images/dr_igor.jpg"
//!
//! [colors]                   # Tailwind `brand-*` palette
//! 50 = "#f0f7ff"
//! 600 = "#2563eb"
//! # ...
//!
//! [nav]
//! featured_states = [
//!     "California", "New York", "Texas",
//!     "Pennsylvania", "Illinois", "Massachusetts",
//! ]
//! footer_states = ["California", "New York", "Texas", "Pennsylvania", "Ohio"]
//!
//! [providers]
//! excluded_states = ["N/A", "Singapore"]
//!
//! [patch]
//! skip_dirs = [".git", ".netlify", ".claude", "node_modules"]
//! skip_root_index = true
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want:
//!
//! ```toml
//! [site]
//! copyright_year = 2027
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Branding and canonical URL settings.
    pub site: SiteInfo,
    /// Medical reviewer credited on every page.
    pub reviewer: ReviewerConfig,
    /// Tailwind `brand-*` color palette.
    pub colors: BrandColors,
    /// Navigation and footer link lists.
    pub nav: NavConfig,
    /// Provider filtering.
    pub providers: ProvidersConfig,
    /// Layout patcher settings.
    pub patch: PatchConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        let url = &self.site.base_url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with '/'".into(),
            ));
        }
        for (shade, value) in self.colors.shades() {
            if !value.starts_with('#') {
                return Err(ConfigError::Validation(format!(
                    "colors.{shade} must be a hex color, got {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Absolute URL for a site-relative path (`/faq/` → `https://…/faq/`).
    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}{}", self.site.base_url, path)
    }
}

/// Branding and canonical URL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Brand shown in the header, titles and footer.
    pub name: String,
    /// Display domain appended to page titles (`| SleepApneaMatch.com`).
    pub domain: String,
    /// Canonical origin without trailing slash.
    pub base_url: String,
    /// One-line description used in the footer.
    pub tagline: String,
    /// Publication date (ISO 8601) stamped into JSON-LD and data files.
    pub published: String,
    /// Year in the footer copyright line.
    pub copyright_year: u32,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "SleepApneaMatch".to_string(),
            domain: "SleepApneaMatch.com".to_string(),
            base_url: "https://sleepapneamatch.com".to_string(),
            tagline: "Compare sleep apnea surgery costs and find verified providers."
                .to_string(),
            published: "2026-01-10".to_string(),
            copyright_year: 2026,
        }
    }
}

/// Medical reviewer credited on articles and in the footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewerConfig {
    pub name: String,
    pub title: String,
    /// Site-relative path to a portrait image.
    pub photo: String,
}

impl Default for ReviewerConfig {
    fn default() -> Self {
        Self {
            name: "Dr. Igor I. Bussel, MD".to_string(),
            title: "Board-Certified Physician".to_string(),
            photo: "/assets/images/dr_igor.jpg".to_string(),
        }
    }
}

/// Tailwind `brand-*` palette, keyed by shade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandColors {
    #[serde(rename = "50")]
    pub shade_50: String,
    #[serde(rename = "100")]
    pub shade_100: String,
    #[serde(rename = "200")]
    pub shade_200: String,
    #[serde(rename = "400")]
    pub shade_400: String,
    #[serde(rename = "600")]
    pub shade_600: String,
    #[serde(rename = "700")]
    pub shade_700: String,
    #[serde(rename = "800")]
    pub shade_800: String,
    #[serde(rename = "900")]
    pub shade_900: String,
}

impl BrandColors {
    /// `(shade, color)` pairs in ascending shade order.
    pub fn shades(&self) -> [(&'static str, &str); 8] {
        [
            ("50", self.shade_50.as_str()),
            ("100", self.shade_100.as_str()),
            ("200", self.shade_200.as_str()),
            ("400", self.shade_400.as_str()),
            ("600", self.shade_600.as_str()),
            ("700", self.shade_700.as_str()),
            ("800", self.shade_800.as_str()),
            ("900", self.shade_900.as_str()),
        ]
    }
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            shade_50: "#f0f7ff".to_string(),
            shade_100: "#e0effe".to_string(),
            shade_200: "#bae0fd".to_string(),
            shade_400: "#60a5fa".to_string(),
            shade_600: "#2563eb".to_string(),
            shade_700: "#1d4ed8".to_string(),
            shade_800: "#1e40af".to_string(),
            shade_900: "#1e3a8a".to_string(),
        }
    }
}

/// Navigation and footer link lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// States listed in the header "Locations" dropdown.
    pub featured_states: Vec<String>,
    /// States listed in the footer "Top Locations" column.
    pub footer_states: Vec<String>,
}

impl Default for NavConfig {
    fn default() -> Self {
        let states = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            featured_states: states(&[
                "California",
                "New York",
                "Texas",
                "Pennsylvania",
                "Illinois",
                "Massachusetts",
            ]),
            footer_states: states(&["California", "New York", "Texas", "Pennsylvania", "Ohio"]),
        }
    }
}

/// Provider filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvidersConfig {
    /// Raw state values whose providers are left out of the directory
    /// (international or placeholder entries).
    pub excluded_states: Vec<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            excluded_states: vec!["N/A".to_string(), "Singapore".to_string()],
        }
    }
}

/// Layout patcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// Directory names never descended into.
    pub skip_dirs: Vec<String>,
    /// Leave `<dir>/index.html` untouched; it is the hand-maintained template.
    pub skip_root_index: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            skip_dirs: [".git", ".netlify", ".claude", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_root_index: true,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# clinic-atlas Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
name = "SleepApneaMatch"
# Shown after the page title: "FAQ | SleepApneaMatch.com"
domain = "SleepApneaMatch.com"
# Canonical origin, no trailing slash.
base_url = "https://sleepapneamatch.com"
tagline = "Compare sleep apnea surgery costs and find verified providers."
# ISO date stamped into JSON-LD (datePublished) and generated data files.
published = "2026-01-10"
copyright_year = 2026

# ---------------------------------------------------------------------------
# Medical reviewer credited on articles and in the footer
# ---------------------------------------------------------------------------
[reviewer]
name = "Dr. Igor I. Bussel, MD"
title = "Board-Certified Physician"
photo = "/assets/images/dr_igor.jpg"

# ---------------------------------------------------------------------------
# Tailwind brand palette (classes like bg-brand-600)
# ---------------------------------------------------------------------------
[colors]
50 = "#f0f7ff"
100 = "#e0effe"
200 = "#bae0fd"
400 = "#60a5fa"
600 = "#2563eb"
700 = "#1d4ed8"
800 = "#1e40af"
900 = "#1e3a8a"

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[nav]
# States in the header "Locations" dropdown.
featured_states = ["California", "New York", "Texas", "Pennsylvania", "Illinois", "Massachusetts"]
# States in the footer "Top Locations" column.
footer_states = ["California", "New York", "Texas", "Pennsylvania", "Ohio"]

# ---------------------------------------------------------------------------
# Providers
# ---------------------------------------------------------------------------
[providers]
# Providers whose state is one of these values get no pages.
excluded_states = ["N/A", "Singapore"]

# ---------------------------------------------------------------------------
# Layout patcher (patch-layout)
# ---------------------------------------------------------------------------
[patch]
# Directory names never descended into.
skip_dirs = [".git", ".netlify", ".claude", "node_modules"]
# Leave the top-level index.html alone (it is the template source).
skip_root_index = true
"##
}

/// Generate the inline `tailwind.config` script body from the brand palette.
pub fn tailwind_config_script(colors: &BrandColors) -> String {
    let palette: String = colors
        .shades()
        .iter()
        .map(|(shade, value)| format!("                            {shade}: '{value}',\n"))
        .collect();
    format!(
        r#"        tailwind.config = {{
            theme: {{
                extend: {{
                    fontFamily: {{
                        sans: ['Inter', 'system-ui', 'sans-serif'],
                    }},
                    colors: {{
                        brand: {{
{palette}                        }}
                    }}
                }}
            }}
        }}"#
    )
}
