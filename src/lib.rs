//! # Clinic Atlas
//!
//! A static site generator for a directory of sleep apnea surgery providers:
//! location pages down to individual practices, procedure cost guides, a blog
//! built from researched FAQ answers, and an FAQ page.
//!
//! # Architecture: Two Stages
//!
//! ```text
//! 1. Ingest    research/*.csv  →  api/*.json    (research exports → normalized data)
//! 2. Generate  api/*.json      →  site pages    (normalized data → HTML)
//! ```
//!
//! The JSON data files are the contract between the stages. They are
//! human-readable, checked in next to the site, and every generator reads
//! only what it needs from them, so any page type can be regenerated on its
//! own. The procedure catalog and the blog post list are editorial content
//! bundled with the binary rather than research data.
//!
//! A third, independent utility, the layout patcher, brings hand-written
//! pages in line with the generated navigation and footer.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ingest`] | Stage 1: research CSVs to normalized JSON data files |
//! | [`generate`] | Stage 2: one generator per page type, plus `generate_all` |
//! | [`pages`] | Page renderers (provider, location, cost guide, blog, FAQ) using Maud |
//! | [`templates`] | Shared layout: `<head>`, navigation, footer, badges, JSON-LD |
//! | [`locations`] | State → city → provider grouping shared by pages and ingest |
//! | [`patch`] | Layout patcher: swaps nav/footer blocks in existing HTML |
//! | [`load`] | CSV and JSON readers, bundled catalog data |
//! | [`emit`] | Output paths and file writes |
//! | [`config`] | `config.toml` loading, validation and merging over stock defaults |
//! | [`types`] | Record types shared by ingest and the generators |
//! | [`naming`] | Slugs and display formatting |
//! | [`output`] | CLI output formatting for every command |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, all interpolation is
//! auto-escaped (provider names and FAQ answers come from research exports),
//! and there is no template directory to ship.
//!
//! ## One Layout for Generators and Patcher
//!
//! Every page is wrapped by [`templates::Layout::page`], and the layout
//! patcher replaces foreign navigation with the exact markup that method
//! emits. Patching a freshly generated site is therefore a no-op, and a
//! hand-written page converges to the generated layout after one pass.
//!
//! ## Skip, Don't Abort
//!
//! A malformed input file aborts the run. A malformed record (a provider
//! without a city, a blog post whose FAQ was removed) is skipped with a
//! warning and listed in the run output, so one bad row never blocks a
//! deploy.

pub mod config;
pub mod emit;
pub mod generate;
pub mod ingest;
pub mod load;
pub mod locations;
pub mod logging;
pub mod naming;
pub mod output;
pub mod pages;
pub mod patch;
pub mod templates;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
