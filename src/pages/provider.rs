//! Provider detail page.

use super::or_default;
use crate::emit;
use crate::locations::{CityGroup, StateGroup};
use crate::naming::{path_slug, slugify};
use crate::templates::{self, Layout, PageHead};
use crate::types::Provider;
use maud::{Markup, html};
use serde_json::{Value, json};

const DEFAULT_PROCEDURES: &str =
    "UPPP, Inspire Therapy, Nasal Surgery, Palate Surgery, Tongue Surgery";
const DEFAULT_SURGEONS: &str = "Contact provider for surgeon information";
const DEFAULT_SPECIALIZATIONS: &str = "Sleep Surgery, Obstructive Sleep Apnea";
const DEFAULT_INSURANCE: &str =
    "Most major insurance plans accepted. Contact provider to verify coverage.";

const ADDRESS_ICON: &str = "M17.657 16.657L13.414 20.9a1.998 1.998 0 01-2.827 0l-4.244-4.243a8 8 0 1111.314 0zM15 11a3 3 0 11-6 0 3 3 0 016 0z";
const PHONE_ICON: &str = "M3 5a2 2 0 012-2h3.28a1 1 0 01.948.684l1.498 4.493a1 1 0 01-.502 1.21l-2.257 1.13a11.042 11.042 0 005.516 5.516l1.13-2.257a1 1 0 011.21-.502l4.493 1.498a1 1 0 01.684.949V19a2 2 0 01-2 2h-1C9.716 21 3 14.284 3 6V5z";
const WEB_ICON: &str = "M21 12a9 9 0 01-9 9m9-9a9 9 0 00-9-9m9 9H3m9 9a9 9 0 01-9-9m9 9c1.657 0 3-4.03 3-9s-1.343-9-3-9m0 18c-1.657 0-3-4.03-3-9s1.343-9 3-9m-9 9a9 9 0 019-9";

/// Site-relative path of a provider's page.
///
/// City cards and the provider generator both go through here, so a card
/// always links to the file that was written.
pub fn page_path(state: &StateGroup, city: &CityGroup, provider: &Provider) -> String {
    emit::provider_page(&state.slug, &city.slug, &page_slug(provider))
}

/// File stem of a provider's page: the name's slug, else the id's slug,
/// else the name spelled out by [`path_slug`]. Never empty for a named
/// provider.
pub fn page_slug(provider: &Provider) -> String {
    let slug = slugify(&provider.name);
    if !slug.is_empty() {
        return slug;
    }
    let id = slugify(&provider.id);
    if !id.is_empty() {
        return id;
    }
    path_slug(&provider.name)
}

fn about_text(provider: &Provider, city: &str, state: &str) -> String {
    let about = provider.about();
    if about.trim().is_empty() {
        format!(
            "{} is a leading sleep apnea surgery provider in {city}, {state}, offering comprehensive \
             evaluation and surgical treatment options for obstructive sleep apnea.",
            provider.name
        )
    } else {
        about.to_string()
    }
}

fn structured_data(provider: &Provider, city: &str, state: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "MedicalBusiness",
        "name": provider.name,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": provider.address,
            "addressLocality": city,
            "addressRegion": state,
            "addressCountry": "US",
        },
        "telephone": provider.phone,
        "url": provider.website,
        "medicalSpecialty": "Sleep Medicine",
    })
}

pub fn render(
    layout: &Layout,
    state: &StateGroup,
    city: &CityGroup,
    provider: &Provider,
) -> Markup {
    let (state_name, city_name) = (state.name.as_str(), city.name.as_str());
    let head = PageHead {
        title: format!("{} | Sleep Apnea Surgery", provider.name),
        description: format!(
            "{} in {city_name}, {state_name} offers sleep apnea surgery including UPPP, Inspire therapy, \
             and more. View procedures, surgeons, and contact information.",
            provider.name
        ),
        path: emit::url_for(&page_path(state, city, provider)),
        keywords: None,
        json_ld: vec![structured_data(provider, city_name, state_name)],
    };

    let locations_url = emit::url_for(&emit::locations_index());
    let state_url = emit::url_for(&emit::state_page(&state.slug));
    let city_url = emit::url_for(&emit::city_page(&state.slug, &city.slug));
    let crumbs = [
        ("Home", "/"),
        ("Locations", locations_url.as_str()),
        (state_name, state_url.as_str()),
        (city_name, city_url.as_str()),
    ];

    let content = html! {
        (templates::breadcrumb(&crumbs, &provider.name))

        section class="bg-white py-12" {
            div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8" {
                div class="flex flex-col md:flex-row md:items-start md:justify-between gap-6" {
                    div {
                        div class="flex flex-wrap gap-2 mb-4" {
                            (templates::kind_badge(provider.kind))
                            (templates::inspire_badge(provider.inspire_certified))
                        }
                        h1 class="text-3xl lg:text-4xl font-bold text-slate-900 mb-2" { (provider.name) }
                        p class="text-lg text-slate-600" { (city_name) ", " (state_name) }
                    }
                    (contact_panel(provider))
                }
            }
        }

        section class="py-12" {
            div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8" {
                div class="grid lg:grid-cols-3 gap-8" {
                    div class="lg:col-span-2 space-y-8" {
                        (detail_card(&format!("About {}", provider.name), &about_text(provider, city_name, state_name)))
                        (detail_card("Procedures Offered", or_default(&provider.procedures_offered, DEFAULT_PROCEDURES)))
                        (detail_card("Key Surgeons", or_default(provider.surgeons(), DEFAULT_SURGEONS)))
                    }
                    div class="space-y-6" {
                        (side_card("Specializations", or_default(&provider.specializations, DEFAULT_SPECIALIZATIONS)))
                        (side_card("Insurance Accepted", or_default(&provider.insurance_accepted, DEFAULT_INSURANCE)))
                        (layout.reviewer_card("Verified Provider"))
                    }
                }
            }
        }
    };

    layout.page(&head, content)
}

fn contact_panel(provider: &Provider) -> Markup {
    html! {
        div class="glass-panel rounded-2xl p-6 min-w-[300px]" {
            h3 class="font-bold text-slate-900 mb-4" { "Contact Information" }
            div class="space-y-3 text-sm" {
                @if !provider.address.is_empty() {
                    div class="flex items-start gap-3" {
                        (templates::icon("w-5 h-5 text-slate-400 mt-0.5", ADDRESS_ICON))
                        span class="text-slate-600" { (provider.address) }
                    }
                }
                @if !provider.phone.is_empty() {
                    div class="flex items-center gap-3" {
                        (templates::icon("w-5 h-5 text-slate-400", PHONE_ICON))
                        a href={ "tel:" (provider.phone) } class="text-brand-600 font-medium hover:text-brand-700" { (provider.phone) }
                    }
                }
                @if !provider.website.is_empty() {
                    div class="flex items-center gap-3" {
                        (templates::icon("w-5 h-5 text-slate-400", WEB_ICON))
                        a href=(provider.website) target="_blank" rel="noopener"
                            class="text-brand-600 font-medium hover:text-brand-700" { "Visit Website" }
                    }
                }
            }
            a href="/#consultation" class="block mt-6 bg-brand-600 text-white text-center py-3 rounded-lg font-semibold hover:bg-brand-700 transition" {
                "Request Consultation"
            }
        }
    }
}

fn detail_card(heading: &str, body: &str) -> Markup {
    html! {
        div class="bg-white rounded-2xl p-6 shadow-sm" {
            h2 class="text-xl font-bold text-slate-900 mb-4" { (heading) }
            p class="text-slate-600 leading-relaxed" { (body) }
        }
    }
}

fn side_card(heading: &str, body: &str) -> Markup {
    html! {
        div class="bg-white rounded-2xl p-6 shadow-sm" {
            h3 class="font-bold text-slate-900 mb-4" { (heading) }
            p class="text-sm text-slate-600" { (body) }
        }
    }
}
