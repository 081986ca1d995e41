//! Page renderers.
//!
//! Each submodule turns one record (or one group of records) into a complete
//! document through the shared [`Layout`](crate::templates::Layout). Renderers
//! are pure: the same input always produces byte-identical markup, and they
//! never touch the filesystem.
//!
//! | Module | Pages |
//! |---|---|
//! | [`provider`] | `locations/<state>/<city>/<provider>.html` |
//! | [`location`] | locations index, state pages, city pages |
//! | [`cost_guide`] | `<procedure>-cost-guide/index.html` |
//! | [`blog`] | blog index and posts |
//! | [`faq`] | `faq/index.html` |

pub mod blog;
pub mod cost_guide;
pub mod faq;
pub mod location;
pub mod provider;

use maud::{Markup, html};

/// Gradient banner with breadcrumb, heading and subtitle.
pub(crate) fn hero(
    crumbs: &[(&str, &str)],
    current: &str,
    heading: &str,
    subtitle: &str,
) -> Markup {
    html! {
        div class="relative bg-gradient-to-r from-brand-900 to-brand-700" {
            div class="relative max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-12 flex flex-col justify-center" {
                div class="text-sm text-brand-100 mb-4" aria-label="Breadcrumb" {
                    @for (label, href) in crumbs {
                        a href=(href) class="hover:text-white" { (label) }
                        span class="mx-2" { "/" }
                    }
                    span class="text-white" { (current) }
                }
                h1 class="text-3xl md:text-4xl font-bold text-white mb-2" { (heading) }
                p class="text-brand-100" { (subtitle) }
            }
        }
    }
}

/// A value or its fallback when empty.
pub(crate) fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
