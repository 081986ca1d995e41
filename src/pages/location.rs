//! Location hierarchy pages: the state list, one page per state listing its
//! cities, and one page per city listing its providers.

use super::{hero, or_default, provider};
use crate::emit;
use crate::locations::{CityGroup, LocationTree, StateGroup};
use crate::naming::{count_label, truncate_chars};
use crate::templates::{self, Layout, PageHead};
use maud::{Markup, html};
use serde_json::{Value, json};

const CARD_PROCEDURES_MAX: usize = 100;

pub fn render_index(layout: &Layout, tree: &LocationTree) -> Markup {
    let total = tree.provider_count();
    let head = PageHead {
        title: "Sleep Apnea Surgery Clinics by State".to_string(),
        description: format!(
            "Find {total} verified sleep apnea surgery clinics across the United States. \
             Browse by state and connect with sleep surgery specialists."
        ),
        path: emit::url_for(&emit::locations_index()),
        ..Default::default()
    };

    let content = html! {
        (hero(
            &[("Home", "/")],
            "Locations",
            "Find Sleep Apnea Surgeons by State",
            &format!(
                "{} across {}",
                count_label(total, "provider", "providers"),
                count_label(tree.states().count(), "state", "states")
            ),
        ))
        div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-12" {
            div class="grid grid-cols-1 md:grid-cols-3 lg:grid-cols-4 gap-6" {
                @for state in tree.states() {
                    a href=(emit::url_for(&emit::state_page(&state.slug)))
                        class="card-hover bg-white rounded-xl overflow-hidden shadow-md" {
                        div class="p-6" {
                            h3 class="text-lg font-bold text-slate-900" { (state.name) }
                            p class="text-sm text-slate-600" {
                                (count_label(state.provider_count(), "Provider", "Providers"))
                                " · "
                                (count_label(state.cities.len(), "City", "Cities"))
                            }
                        }
                    }
                }
            }
        }
    };

    layout.page(&head, content)
}

pub fn render_state(layout: &Layout, state: &StateGroup) -> Markup {
    let total = state.provider_count();
    let cities = state.cities.len();
    let head = PageHead {
        title: format!("Sleep Apnea Surgery Clinics in {}", state.name),
        description: format!(
            "Find {total} verified sleep apnea surgery clinics across {cities} cities in {}. \
             Compare providers and connect with sleep surgery specialists.",
            state.name
        ),
        path: emit::url_for(&emit::state_page(&state.slug)),
        ..Default::default()
    };
    let locations_url = emit::url_for(&emit::locations_index());

    let content = html! {
        (hero(
            &[("Home", "/"), ("Locations", locations_url.as_str())],
            &state.name,
            &format!("Sleep Apnea Surgery in {}", state.name),
            &format!("{total} providers across {cities} cities"),
        ))
        div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-12" {
            div class="grid grid-cols-1 md:grid-cols-3 lg:grid-cols-4 gap-6" {
                @for city in state.cities() {
                    a href=(emit::url_for(&emit::city_page(&state.slug, &city.slug)))
                        class="card-hover bg-white rounded-xl overflow-hidden shadow-md" {
                        div class="p-6" {
                            h3 class="text-lg font-bold text-slate-900" { (city.name) }
                            p class="text-sm text-slate-600" {
                                (count_label(city.providers.len(), "Sleep Surgery Provider", "Sleep Surgery Providers"))
                            }
                        }
                    }
                }
            }
        }
    };

    layout.page(&head, content)
}

fn city_structured_data(state: &StateGroup, city: &CityGroup) -> Value {
    let items: Vec<Value> = city
        .providers
        .iter()
        .enumerate()
        .map(|(i, p)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "item": {
                    "@type": "MedicalBusiness",
                    "name": p.name,
                    "address": {
                        "@type": "PostalAddress",
                        "addressLocality": city.name,
                        "addressRegion": state.name,
                    },
                },
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": format!("Sleep Surgery Clinics in {}, {}", city.name, state.name),
        "numberOfItems": city.providers.len(),
        "itemListElement": items,
    })
}

pub fn render_city(layout: &Layout, state: &StateGroup, city: &CityGroup) -> Markup {
    let count = city.providers.len();
    let head = PageHead {
        title: format!("Sleep Apnea Surgery Clinics in {}, {}", city.name, state.name),
        description: format!(
            "Find {count} verified sleep apnea surgery clinics in {}, {}. Compare providers, \
             view procedures offered, and connect with sleep surgery specialists.",
            city.name, state.name
        ),
        path: emit::url_for(&emit::city_page(&state.slug, &city.slug)),
        keywords: None,
        json_ld: vec![city_structured_data(state, city)],
    };
    let locations_url = emit::url_for(&emit::locations_index());
    let state_url = emit::url_for(&emit::state_page(&state.slug));

    let content = html! {
        (hero(
            &[
                ("Home", "/"),
                ("Locations", locations_url.as_str()),
                (state.name.as_str(), state_url.as_str()),
            ],
            &city.name,
            &format!("Sleep Apnea Surgery in {}", city.name),
            &format!("{} verified sleep surgery providers", count),
        ))
        div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-12" {
            div class="grid grid-cols-1 md:grid-cols-2 gap-6" {
                @for p in &city.providers {
                    div class="provider-card bg-white rounded-xl shadow-md overflow-hidden card-hover" {
                        div class="p-6" {
                            div class="flex justify-between items-start mb-3" {
                                h3 class="text-xl font-bold text-slate-900" { (p.name) }
                                (templates::inspire_badge(p.inspire_certified))
                            }
                            p class="text-slate-600 text-sm mb-2" { (p.address) }
                            p class="text-slate-500 text-sm mb-3" { (or_default(&p.specializations, "Sleep Surgery")) }
                            p class="text-sm text-slate-600 mb-4" {
                                (truncate_chars(or_default(&p.procedures_offered, "Sleep apnea surgery"), CARD_PROCEDURES_MAX))
                            }
                            div class="flex justify-between items-center" {
                                span class="text-brand-600 font-semibold" { (p.phone) }
                                a href=(emit::url_for(&provider::page_path(state, city, p)))
                                    class="bg-brand-600 text-white px-4 py-2 rounded-lg text-sm hover:bg-brand-700 transition" {
                                    "View Details"
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    layout.page(&head, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::test_helpers::provider as make_provider;
    use crate::types::Provider;

    fn three_providers() -> Vec<Provider> {
        vec![
            make_provider("Stanford Sleep Surgery", "Palo Alto", "California"),
            make_provider("Bay Area Sleep", "Palo Alto", "California"),
            make_provider("UCLA Sleep Center", "Los Angeles", "California"),
        ]
    }

    #[test]
    fn city_pages_list_one_card_per_provider() {
        let config = SiteConfig::default();
        let layout = Layout::new(&config, &[]);
        let providers = three_providers();
        let tree = LocationTree::build(&providers, &[]);
        let ca = tree.state("california").unwrap();

        let palo_alto = render_city(&layout, ca, ca.city("palo-alto").unwrap()).into_string();
        let los_angeles = render_city(&layout, ca, ca.city("los-angeles").unwrap()).into_string();
        assert_eq!(palo_alto.matches("provider-card").count(), 2);
        assert_eq!(los_angeles.matches("provider-card").count(), 1);
    }

    #[test]
    fn city_card_links_to_provider_page() {
        let config = SiteConfig::default();
        let layout = Layout::new(&config, &[]);
        let providers = three_providers();
        let tree = LocationTree::build(&providers, &[]);
        let ca = tree.state("california").unwrap();
        let html = render_city(&layout, ca, ca.city("palo-alto").unwrap()).into_string();
        assert!(html.contains(
            r#"href="/locations/california/palo-alto/stanford-sleep-surgery.html""#
        ));
        assert!(html.contains(r#""@type": "ItemList""#));
        assert!(html.contains(r#""numberOfItems": 2"#));
    }

    #[test]
    fn city_card_truncates_long_procedures() {
        let config = SiteConfig::default();
        let layout = Layout::new(&config, &[]);
        let mut p = make_provider("A", "Austin", "Texas");
        p.procedures_offered = "x".repeat(150);
        let providers = vec![p];
        let tree = LocationTree::build(&providers, &[]);
        let tx = tree.state("texas").unwrap();
        let html = render_city(&layout, tx, tx.city("austin").unwrap()).into_string();
        assert!(html.contains(&format!("{}...", "x".repeat(100))));
        assert!(!html.contains(&"x".repeat(101)));
    }

    #[test]
    fn state_page_counts_providers_per_city() {
        let config = SiteConfig::default();
        let layout = Layout::new(&config, &[]);
        let providers = three_providers();
        let tree = LocationTree::build(&providers, &[]);
        let html = render_state(&layout, tree.state("california").unwrap()).into_string();
        assert!(html.contains("2 Sleep Surgery Providers"));
        assert!(html.contains("1 Sleep Surgery Provider<"));
        assert!(html.contains(r#"href="/locations/california/los-angeles/""#));
    }

    #[test]
    fn index_lists_states_with_counts() {
        let config = SiteConfig::default();
        let layout = Layout::new(&config, &[]);
        let mut providers = three_providers();
        providers.push(make_provider("Mount Sinai", "New York", "New York"));
        let tree = LocationTree::build(&providers, &[]);
        let html = render_index(&layout, &tree).into_string();
        assert!(html.contains("3 Providers · 2 Cities"));
        assert!(html.contains("1 Provider · 1 City"));
        assert!(html.contains(r#"href="/locations/new-york/""#));
    }
}
