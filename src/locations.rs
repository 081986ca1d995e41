//! State → city grouping of providers.
//!
//! The location directory is a three-level tree derived from the flat
//! provider list:
//!
//! ```text
//! locations/                       # every state
//! ├── california/                  # every city in California
//! │   ├── los-angeles/             # every provider in Los Angeles
//! │   └── palo-alto/
//! └── new-york/
//!     └── new-york/
//! ```
//!
//! Buckets are keyed by [`path_slug`], so `"St. Louis"` and `"St Louis"` land
//! in the same city, and a city with no ASCII letters (`"東京"`) still gets a
//! bucket of its own. The display name of a bucket is the first raw name
//! seen. Within a city, providers keep their input order. A provider without
//! a name, state or city, or whose state is excluded by config, is left out
//! of the tree and reported through [`LocationTree::skipped`].

use crate::naming::path_slug;
use crate::types::Provider;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct LocationTree<'a> {
    states: BTreeMap<String, StateGroup<'a>>,
    skipped: Vec<&'a Provider>,
}

#[derive(Debug)]
pub struct StateGroup<'a> {
    pub name: String,
    pub slug: String,
    pub cities: BTreeMap<String, CityGroup<'a>>,
}

#[derive(Debug)]
pub struct CityGroup<'a> {
    pub name: String,
    pub slug: String,
    pub providers: Vec<&'a Provider>,
}

impl<'a> LocationTree<'a> {
    /// Group providers by state slug, then city slug.
    ///
    /// `excluded_states` is matched case-insensitively against the trimmed
    /// raw state value.
    pub fn build(providers: &'a [Provider], excluded_states: &[String]) -> Self {
        let mut tree = LocationTree::default();
        for provider in providers {
            let state = provider.state.trim();
            let city = provider.city.trim();
            let excluded = excluded_states
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(state));
            let unnamed = provider.name.trim().is_empty();
            if unnamed || state.is_empty() || city.is_empty() || excluded {
                tree.skipped.push(provider);
                continue;
            }
            let (state_slug, city_slug) = (path_slug(state), path_slug(city));

            let state_group = tree
                .states
                .entry(state_slug.clone())
                .or_insert_with(|| StateGroup {
                    name: state.to_string(),
                    slug: state_slug,
                    cities: BTreeMap::new(),
                });
            state_group
                .cities
                .entry(city_slug.clone())
                .or_insert_with(|| CityGroup {
                    name: city.to_string(),
                    slug: city_slug,
                    providers: Vec::new(),
                })
                .providers
                .push(provider);
        }
        tree
    }

    /// States in slug order.
    pub fn states(&self) -> impl Iterator<Item = &StateGroup<'a>> {
        self.states.values()
    }

    pub fn state(&self, slug: &str) -> Option<&StateGroup<'a>> {
        self.states.get(slug)
    }

    /// Providers that could not be placed in the tree.
    pub fn skipped(&self) -> &[&'a Provider] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn provider_count(&self) -> usize {
        self.states().map(StateGroup::provider_count).sum()
    }

    pub fn city_count(&self) -> usize {
        self.states().map(|s| s.cities.len()).sum()
    }

    /// Compact JSON summary of the tree, persisted as `locations.json`.
    pub fn to_index_json(&self) -> Value {
        let mut states = Map::new();
        for state in self.states() {
            let mut cities = Map::new();
            for city in state.cities() {
                let providers: Vec<Value> = city
                    .providers
                    .iter()
                    .map(|p| {
                        json!({
                            "id": p.id,
                            "name": p.name,
                            "slug": p.slug,
                            "type": p.kind,
                            "inspire_certified": p.inspire_certified,
                        })
                    })
                    .collect();
                cities.insert(
                    city.slug.clone(),
                    json!({ "name": city.name, "slug": city.slug, "providers": providers }),
                );
            }
            states.insert(
                state.slug.clone(),
                json!({ "name": state.name, "slug": state.slug, "cities": cities }),
            );
        }
        Value::Object(states)
    }
}

impl<'a> StateGroup<'a> {
    /// Cities in slug order.
    pub fn cities(&self) -> impl Iterator<Item = &CityGroup<'a>> {
        self.cities.values()
    }

    pub fn city(&self, slug: &str) -> Option<&CityGroup<'a>> {
        self.cities.get(slug)
    }

    pub fn provider_count(&self) -> usize {
        self.cities().map(|c| c.providers.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::provider;

    fn no_exclusions() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn groups_by_state_then_city() {
        let providers = vec![
            provider("Stanford Sleep Surgery", "Palo Alto", "California"),
            provider("UCLA Sleep Center", "Los Angeles", "California"),
            provider("Mount Sinai", "New York", "New York"),
        ];
        let tree = LocationTree::build(&providers, &no_exclusions());

        let slugs: Vec<&str> = tree.states().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["california", "new-york"]);

        let ca = tree.state("california").unwrap();
        let cities: Vec<&str> = ca.cities().map(|c| c.slug.as_str()).collect();
        assert_eq!(cities, vec!["los-angeles", "palo-alto"]);
        assert_eq!(tree.provider_count(), 3);
        assert_eq!(tree.city_count(), 3);
    }

    #[test]
    fn preserves_input_order_within_city() {
        let providers = vec![
            provider("Zeta Clinic", "Boston", "Massachusetts"),
            provider("Alpha Clinic", "Boston", "Massachusetts"),
            provider("Mid Clinic", "Boston", "Massachusetts"),
        ];
        let tree = LocationTree::build(&providers, &no_exclusions());
        let boston = tree.state("massachusetts").unwrap().city("boston").unwrap();
        let names: Vec<&str> = boston.providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta Clinic", "Alpha Clinic", "Mid Clinic"]);
    }

    #[test]
    fn drops_providers_missing_state_or_city() {
        let providers = vec![
            provider("No City", "", "Texas"),
            provider("No State", "Houston", ""),
            provider("Blank", "   ", "  "),
            provider("Kept", "Houston", "Texas"),
        ];
        let tree = LocationTree::build(&providers, &no_exclusions());
        assert_eq!(tree.provider_count(), 1);
        let skipped: Vec<&str> = tree.skipped().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(skipped, vec!["No City", "No State", "Blank"]);
    }

    #[test]
    fn drops_providers_without_a_name() {
        let providers = vec![
            provider("", "Austin", "Texas"),
            provider("  ", "Austin", "Texas"),
            provider("Kept", "Austin", "Texas"),
        ];
        let tree = LocationTree::build(&providers, &no_exclusions());
        let austin = tree.state("texas").unwrap().city("austin").unwrap();
        assert_eq!(austin.providers.len(), 1);
        assert_eq!(tree.skipped().len(), 2);
    }

    #[test]
    fn non_ascii_locations_get_their_own_buckets() {
        let providers = vec![
            provider("Clinic", "東京", "Tokyo Prefecture"),
            provider("Other", "大阪", "Tokyo Prefecture"),
            provider("Dots", "...", "Texas"),
        ];
        let tree = LocationTree::build(&providers, &no_exclusions());
        assert!(tree.skipped().is_empty());
        assert_eq!(tree.provider_count(), 3);

        let tokyo = tree.state("tokyo-prefecture").unwrap();
        assert_eq!(tokyo.cities.len(), 2);
        let city = tokyo.city("u6771-u4eac").unwrap();
        assert_eq!(city.name, "東京");
        assert_eq!(city.providers[0].name, "Clinic");
        assert!(tree.state("texas").unwrap().city("u2e-u2e-u2e").is_some());
    }

    #[test]
    fn drops_excluded_states_case_insensitively() {
        let providers = vec![
            provider("Intl", "Singapore", "Singapore"),
            provider("Placeholder", "Somewhere", "n/a"),
            provider("Kept", "Dallas", "Texas"),
        ];
        let excluded = vec!["N/A".to_string(), "Singapore".to_string()];
        let tree = LocationTree::build(&providers, &excluded);
        assert_eq!(tree.provider_count(), 1);
        assert_eq!(tree.skipped().len(), 2);
        assert!(tree.state("singapore").is_none());
    }

    #[test]
    fn equivalent_spellings_share_a_bucket() {
        let providers = vec![
            provider("A", "St. Louis", "Missouri"),
            provider("B", "St Louis", "Missouri"),
        ];
        let tree = LocationTree::build(&providers, &no_exclusions());
        let mo = tree.state("missouri").unwrap();
        assert_eq!(mo.cities.len(), 1);
        let city = mo.city("st-louis").unwrap();
        assert_eq!(city.name, "St. Louis");
        assert_eq!(city.providers.len(), 2);
    }

    #[test]
    fn every_placed_provider_appears_exactly_once() {
        let providers = vec![
            provider("A", "Austin", "Texas"),
            provider("B", "Austin", "Texas"),
            provider("C", "Dallas", "Texas"),
            provider("D", "Denver", "Colorado"),
            provider("E", "", "Colorado"),
            provider("F", "東京", "Tokyo"),
            provider("G", "...", "Texas"),
        ];
        let tree = LocationTree::build(&providers, &no_exclusions());
        for p in &providers {
            let hits = tree
                .states()
                .flat_map(|s| s.cities())
                .flat_map(|c| c.providers.iter())
                .filter(|placed| std::ptr::eq(**placed, p))
                .count();
            let expected = usize::from(!p.city.trim().is_empty() && !p.state.trim().is_empty());
            assert_eq!(hits, expected, "provider {}", p.name);
        }
    }

    #[test]
    fn index_json_mirrors_tree() {
        let mut p = provider("Stanford Sleep Surgery", "Palo Alto", "California");
        p.id = "center-001".into();
        p.inspire_certified = true;
        let providers = vec![p];
        let tree = LocationTree::build(&providers, &no_exclusions());
        let json = tree.to_index_json();

        let city = &json["california"]["cities"]["palo-alto"];
        assert_eq!(json["california"]["name"], "California");
        assert_eq!(city["name"], "Palo Alto");
        assert_eq!(city["providers"][0]["id"], "center-001");
        assert_eq!(city["providers"][0]["type"], "academic_medical_center");
        assert_eq!(city["providers"][0]["inspire_certified"], true);
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        let tree = LocationTree::build(&[], &no_exclusions());
        assert!(tree.is_empty());
        assert_eq!(tree.provider_count(), 0);
    }
}
