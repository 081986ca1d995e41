//! Shared page layout.
//!
//! Every generated page goes through [`Layout::page`], which wraps page
//! content in the same `<head>`, navigation and footer. The layout patcher
//! uses [`Layout::universal_nav`] and [`Layout::universal_footer`] from here
//! too, so running it over freshly generated output changes nothing.
//!
//! Styling is Tailwind utility classes (CDN build, brand palette injected
//! from config). The mobile menu is a checkbox toggle and needs no script.

use crate::config::{self, SiteConfig};
use crate::emit;
use crate::naming::path_slug;
use crate::types::{Procedure, ProviderKind};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::Value;

pub const NAV_MARKER: &str = "<!-- Navigation -->";
pub const FOOTER_MARKER: &str = "<!-- Footer -->";

pub const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
pub const ALPINE_CDN: &str = "https://unpkg.com/alpinejs@3.x.x/dist/cdn.min.js";

/// Navigation dropdown rules. Also injected by the layout patcher.
pub const NAV_CSS: &str = include_str!("../static/nav.css");
const SITE_CSS: &str = include_str!("../static/site.css");

/// Number of procedures linked from the footer.
const FOOTER_PROCEDURES: usize = 6;

const MOON_ICON: &str =
    "M20.354 15.354A9 9 0 018.646 3.646 9.003 9.003 0 0012 21a9.003 9.003 0 008.354-5.646z";
const CHEVRON_ICON: &str = "M19 9l-7 7-7-7";
const MENU_ICON: &str = "M4 6h16M4 12h16M4 18h16";
const CHECK_ICON: &str = "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z";

/// Per-page `<head>` metadata.
#[derive(Debug, Clone, Default)]
pub struct PageHead {
    /// Title without the ` | domain` suffix.
    pub title: String,
    pub description: String,
    /// Site-relative URL, e.g. `/faq/`.
    pub path: String,
    pub keywords: Option<String>,
    pub json_ld: Vec<Value>,
}

/// Site-wide context every page renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub config: &'a SiteConfig,
    pub procedures: &'a [Procedure],
}

impl<'a> Layout<'a> {
    pub fn new(config: &'a SiteConfig, procedures: &'a [Procedure]) -> Self {
        Self { config, procedures }
    }

    /// Full HTML document around `content`.
    pub fn page(&self, head: &PageHead, content: Markup) -> Markup {
        let site = &self.config.site;
        let palette = config::tailwind_config_script(&self.config.colors);
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (head.title) " | " (site.domain) }
                    meta name="description" content=(head.description);
                    @if let Some(keywords) = &head.keywords {
                        meta name="keywords" content=(keywords);
                    }
                    link rel="canonical" href=(self.config.canonical_url(&head.path));
                    meta property="og:title" content=(head.title);
                    meta property="og:description" content=(head.description);
                    meta property="og:type" content="website";
                    link rel="preconnect" href="https://fonts.googleapis.com";
                    link rel="preconnect" href="https://fonts.gstatic.com" crossorigin;
                    link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700;800&display=swap" rel="stylesheet";
                    script src=(TAILWIND_CDN) {}
                    script { (PreEscaped(format!("\n{palette}\n    "))) }
                    script defer src=(ALPINE_CDN) {}
                    style { (PreEscaped(NAV_CSS)) (PreEscaped(SITE_CSS)) }
                    @for data in &head.json_ld {
                        (json_ld(data))
                    }
                }
                body class="font-sans antialiased text-slate-900 bg-slate-50 min-h-screen" {
                    (PreEscaped(NAV_MARKER))
                    (self.nav())
                    (content)
                    (PreEscaped(FOOTER_MARKER))
                    (self.footer())
                }
            }
        }
    }

    /// Marker comment plus navigation, exactly as it appears in pages.
    pub fn universal_nav(&self) -> String {
        format!("{NAV_MARKER}{}", self.nav().into_string())
    }

    /// Marker comment plus footer, exactly as it appears in pages.
    pub fn universal_footer(&self) -> String {
        format!("{FOOTER_MARKER}{}", self.footer().into_string())
    }

    fn brand_mark(&self) -> Markup {
        html! {
            div class="w-8 h-8 rounded-lg bg-brand-600 flex items-center justify-center" {
                (icon("w-5 h-5 text-white", MOON_ICON))
            }
        }
    }

    /// Sticky site header. Contains no nested `<nav>` elements.
    pub fn nav(&self) -> Markup {
        let locations = emit::url_for(&emit::locations_index());
        let links = [
            ("/", "Find Providers"),
            ("/guides/", "Guides"),
            ("/blog/", "Blog"),
            ("/patient-journey/", "Patient Journey"),
        ];
        html! {
            nav class="sticky top-0 z-50 bg-white/80 backdrop-blur-md border-b border-slate-200" {
                div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8" {
                    input id="nav-toggle" class="peer hidden" type="checkbox";
                    div class="flex justify-between h-16 items-center" {
                        a href="/" class="flex items-center gap-2" {
                            (self.brand_mark())
                            span class="text-xl font-bold tracking-tight text-slate-900" {
                                (self.config.site.name)
                                span class="text-brand-600" { "." }
                            }
                        }
                        div class="hidden md:flex space-x-8 text-sm font-semibold text-slate-600" {
                            @for (href, label) in links {
                                a href=(href) class="hover:text-brand-600 transition" { (label) }
                            }
                            div class="nav-dropdown-container" {
                                a href=(locations) class="hover:text-brand-600 transition inline-flex items-center gap-1" {
                                    "Locations"
                                    (icon("w-4 h-4", CHEVRON_ICON))
                                }
                                div class="nav-dropdown-menu" {
                                    a href=(locations) class="font-bold text-brand-600" { "View All Locations →" }
                                    div class="h-px bg-slate-100 my-2" {}
                                    @for state in &self.config.nav.featured_states {
                                        a href=(state_url(state)) { (state) }
                                    }
                                }
                            }
                            a href="/faq/" class="hover:text-brand-600 transition" { "FAQ" }
                        }
                        div class="hidden md:flex items-center gap-4" {
                            a href="/#consultation" class="bg-brand-600 text-white px-4 py-2 rounded-lg font-semibold text-sm hover:bg-brand-700 transition" {
                                "Get Matched"
                            }
                        }
                        label for="nav-toggle" class="md:hidden p-2 cursor-pointer" aria-label="Menu" {
                            (icon("w-6 h-6", MENU_ICON))
                        }
                    }
                    div class="hidden peer-checked:block md:hidden py-4 border-t border-slate-200" {
                        @for (href, label) in links {
                            a href=(href) class="block py-2 text-slate-600 font-medium" { (label) }
                        }
                        a href=(locations) class="block py-2 text-slate-600 font-medium" { "Locations" }
                        a href="/faq/" class="block py-2 text-slate-600 font-medium" { "FAQ" }
                        a href="/#consultation" class="block mt-4 bg-brand-600 text-white text-center py-2 rounded-lg font-semibold" {
                            "Get Matched"
                        }
                    }
                }
            }
        }
    }

    pub fn footer(&self) -> Markup {
        let site = &self.config.site;
        let reviewer = &self.config.reviewer.name;
        html! {
            footer class="bg-slate-900 text-slate-400 py-16" {
                div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8" {
                    div class="grid md:grid-cols-4 gap-8 mb-12" {
                        div {
                            div class="flex items-center gap-2 mb-4" {
                                (self.brand_mark())
                                span class="text-xl font-bold text-white" { (site.name) }
                            }
                            p class="text-sm" {
                                (site.tagline) " Medically reviewed by " (reviewer) "."
                            }
                        }
                        div {
                            h4 class="text-white font-semibold mb-4" { "Procedures" }
                            ul class="space-y-2 text-sm" {
                                @for procedure in self.procedures.iter().take(FOOTER_PROCEDURES) {
                                    li {
                                        a href=(emit::url_for(&emit::cost_guide_page(&procedure.slug)))
                                            class="hover:text-white transition" { (procedure.short_name) }
                                    }
                                }
                            }
                        }
                        div {
                            h4 class="text-white font-semibold mb-4" { "Top Locations" }
                            ul class="space-y-2 text-sm" {
                                @for state in &self.config.nav.footer_states {
                                    li { a href=(state_url(state)) class="hover:text-white transition" { (state) } }
                                }
                                li {
                                    a href=(emit::url_for(&emit::locations_index())) class="hover:text-white transition" {
                                        "All Locations →"
                                    }
                                }
                            }
                        }
                        div {
                            h4 class="text-white font-semibold mb-4" { "Resources" }
                            ul class="space-y-2 text-sm" {
                                li { a href="/guides/" class="hover:text-white transition" { "Guides" } }
                                li { a href="/blog/" class="hover:text-white transition" { "Blog" } }
                                li { a href="/patient-journey/" class="hover:text-white transition" { "Patient Journey" } }
                                li { a href="/faq/" class="hover:text-white transition" { "FAQ" } }
                            }
                        }
                    }
                    div class="border-t border-slate-800 pt-8 flex flex-col md:flex-row justify-between items-center gap-4" {
                        p class="text-sm" {
                            "© " (site.copyright_year) " " (site.domain) ". All rights reserved."
                        }
                        p class="text-xs text-slate-500" {
                            "Medical information is reviewed by " (reviewer) ". This site does not provide medical advice."
                        }
                    }
                }
            }
        }
    }

    /// Reviewer card shown beside articles and provider details.
    pub fn reviewer_card(&self, caption: &str) -> Markup {
        let reviewer = &self.config.reviewer;
        html! {
            div class="bg-gradient-to-br from-slate-50 to-slate-100 rounded-2xl p-6 border border-slate-200" {
                div class="flex items-center gap-3 mb-3" {
                    img src=(reviewer.photo) alt=(reviewer.name)
                        class="w-10 h-10 rounded-full object-cover ring-2 ring-white shadow";
                    div {
                        div class="font-bold text-slate-900 text-sm" { (reviewer.name) }
                        div class="text-xs text-slate-500" { (reviewer.title) }
                    }
                }
                div class="flex items-center gap-1 text-xs text-green-600" {
                    (icon("w-4 h-4", CHECK_ICON))
                    span class="font-medium" { (caption) }
                }
            }
        }
    }
}

/// `/locations/<state-slug>/`
pub fn state_url(state: &str) -> String {
    emit::url_for(&emit::state_page(&path_slug(state)))
}

/// Stroke icon with a single path.
pub fn icon(class: &str, path: &str) -> Markup {
    html! {
        svg class=(class) fill="none" stroke="currentColor" viewBox="0 0 24 24" {
            path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=(path) {}
        }
    }
}

/// Breadcrumb trail. The last crumb is the current page and is not linked.
pub fn breadcrumb(crumbs: &[(&str, &str)], current: &str) -> Markup {
    html! {
        div class="bg-white border-b border-slate-200" {
            div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-3" {
                div class="text-sm text-slate-500" aria-label="Breadcrumb" {
                    @for (label, href) in crumbs {
                        a href=(href) class="hover:text-brand-600" { (label) }
                        span class="mx-2" { "/" }
                    }
                    span class="text-slate-900 font-medium" { (current) }
                }
            }
        }
    }
}

pub fn kind_badge(kind: ProviderKind) -> Markup {
    html! {
        span class="bg-brand-50 text-brand-700 px-3 py-1 rounded-full text-sm font-medium" { (kind.label()) }
    }
}

/// Shown only for Inspire-certified providers.
pub fn inspire_badge(certified: bool) -> Markup {
    html! {
        @if certified {
            span class="bg-green-50 text-green-700 px-3 py-1 rounded-full text-sm font-medium" { "Inspire Certified" }
        }
    }
}

/// Structured-data block. `</` is escaped so the payload cannot close the
/// surrounding script element.
pub fn json_ld(data: &Value) -> Markup {
    let body = format!("{data:#}").replace("</", "<\\/");
    html! {
        script type="application/ld+json" { (PreEscaped(body)) }
    }
}
