//! Bidirectional mapping between filter state and URL query parameters.
//!
//! The synchronizer owns a fixed set of parameter names plus the attribute
//! taxonomy keys it is configured with; every other query parameter (search
//! terms, campaign tags, whatever marketing appended) passes through every
//! rewrite untouched.
//!
//! Serialization keeps URLs canonical: empty sets, unset sort, `instock =
//! false`, and page 0 all omit their parameter entirely rather than writing
//! an empty value.

use std::collections::BTreeSet;

use url::Url;

use bramble_core::{Slug, SortOrder};

use crate::filter::FilterState;

const CATEGORIES: &str = "categories";
const BRANDS: &str = "brands";
const INSTOCK: &str = "instock";
const SORT: &str = "sort";
const PAGE: &str = "page";

/// Serializes filter state into URL query parameters and back.
#[derive(Debug, Clone)]
pub struct UrlSync {
    taxonomies: Vec<String>,
}

impl UrlSync {
    /// Create a synchronizer aware of the given attribute taxonomy keys.
    ///
    /// Taxonomies present in the remote schema but absent from a URL read
    /// as empty selections; parameters matching a taxonomy key are owned by
    /// the synchronizer and rewritten, all others are preserved.
    #[must_use]
    pub const fn new(taxonomies: Vec<String>) -> Self {
        Self { taxonomies }
    }

    /// The attribute taxonomy keys this synchronizer owns.
    #[must_use]
    pub fn taxonomies(&self) -> &[String] {
        &self.taxonomies
    }

    fn owns(&self, key: &str) -> bool {
        matches!(key, CATEGORIES | BRANDS | INSTOCK | SORT | PAGE)
            || self.taxonomies.iter().any(|t| t == key)
    }

    /// Read filter state out of a URL.
    ///
    /// Parsing is defensive throughout: malformed slugs are skipped, an
    /// unparseable `page` falls back to 0, and an unknown `sort` key reads
    /// as unset. A listing page must render no matter what the query string
    /// holds.
    #[must_use]
    pub fn read(&self, url: &Url) -> FilterState {
        let mut state = FilterState::default();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                CATEGORIES => state.categories = parse_slug_list(&value),
                BRANDS => state.brands = parse_slug_list(&value),
                INSTOCK => state.instock = value == "true",
                SORT => state.sort = SortOrder::parse(&value),
                PAGE => state.page = value.parse().unwrap_or(0),
                key if self.taxonomies.iter().any(|t| t == key) => {
                    let options = parse_slug_list(&value);
                    if !options.is_empty() {
                        state.attributes.insert(key.to_string(), options);
                    }
                }
                _ => {}
            }
        }

        state.normalize();
        state
    }

    /// Write filter state into a URL, preserving unrelated parameters.
    ///
    /// Returns a new URL; the input is untouched. Unrelated parameters keep
    /// their original order, followed by the owned parameters in canonical
    /// order.
    #[must_use]
    pub fn write(&self, url: &Url, state: &FilterState) -> Url {
        let passthrough: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !self.owns(key) && !state.attributes.contains_key(key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut pairs = passthrough;

        if let Some(joined) = join_slug_list(&state.categories) {
            pairs.push((CATEGORIES.to_string(), joined));
        }
        if let Some(joined) = join_slug_list(&state.brands) {
            pairs.push((BRANDS.to_string(), joined));
        }
        for (taxonomy, options) in &state.attributes {
            if let Some(joined) = join_slug_list(options) {
                pairs.push((taxonomy.clone(), joined));
            }
        }
        if state.instock {
            pairs.push((INSTOCK.to_string(), "true".to_string()));
        }
        if let Some(sort) = state.sort {
            pairs.push((SORT.to_string(), sort.as_str().to_string()));
        }
        if state.page > 0 {
            pairs.push((PAGE.to_string(), state.page.to_string()));
        }

        let mut out = url.clone();
        out.set_query(None);
        if !pairs.is_empty() {
            out.query_pairs_mut().extend_pairs(&pairs);
        }
        out
    }
}

fn parse_slug_list(value: &str) -> BTreeSet<Slug> {
    value
        .split(',')
        .filter(|part| !part.is_empty())
        .filter_map(|part| Slug::parse(part).ok())
        .collect()
}

fn join_slug_list(slugs: &BTreeSet<Slug>) -> Option<String> {
    if slugs.is_empty() {
        return None;
    }
    Some(
        slugs
            .iter()
            .map(Slug::as_str)
            .collect::<Vec<_>>()
            .join(","),
    )
}
