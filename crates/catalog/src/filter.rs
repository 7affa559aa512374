//! Canonical filter state for catalog listings.
//!
//! The store is the single source of truth for the filter query. Filter
//! controls read the current state, patch their own field, and write the
//! whole state back; the store does not merge partial updates. That keeps
//! each control simple and makes lost updates impossible from a single
//! control, at the cost of requiring read-before-write at every call site.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use bramble_core::{Slug, SortOrder};

/// The canonical filter query for one listing page.
///
/// Set-valued fields use `BTreeSet` so membership is unique and iteration
/// order is stable regardless of click order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected category slugs.
    pub categories: BTreeSet<Slug>,
    /// Selected brand slugs.
    pub brands: BTreeSet<Slug>,
    /// Selected attribute options, keyed by taxonomy (e.g. `pa_colour`).
    pub attributes: BTreeMap<String, BTreeSet<Slug>>,
    /// Only show purchasable items.
    pub instock: bool,
    /// Selected sort order; `None` until the shopper picks one.
    pub sort: Option<SortOrder>,
    /// Currently anchored page index.
    pub page: u32,
}

impl FilterState {
    /// Whether any filter dimension is set, ignoring `page`.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.brands.is_empty()
            || self.attributes.values().any(|opts| !opts.is_empty())
            || self.instock
            || self.sort.is_some()
    }

    /// Equality over every field except `page`.
    ///
    /// Two states that agree here describe the same listing; only the
    /// pagination anchor differs.
    #[must_use]
    pub fn eq_ignoring_page(&self, other: &Self) -> bool {
        self.categories == other.categories
            && self.brands == other.brands
            && self.attributes == other.attributes
            && self.instock == other.instock
            && self.sort == other.sort
    }

    /// Drop attribute entries whose option set is empty.
    ///
    /// An attribute key with no selected options is indistinguishable from
    /// an absent key, so normalizing keeps equality and URL round-trips
    /// honest.
    pub fn normalize(&mut self) {
        self.attributes.retain(|_, opts| !opts.is_empty());
    }
}

/// Where a state mutation came from.
///
/// The store behaves differently for shopper edits and URL hydration (page
/// reset, pinned-brand enforcement), so callers declare the origin instead
/// of the store suppressing its own change notifications with a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A filter control wrote new state.
    UserEdit,
    /// State was read back out of the URL (initial load, back/forward).
    UrlHydration,
}

/// Single source of truth for one listing page's filter query.
#[derive(Debug, Clone)]
pub struct FilterStore {
    state: FilterState,
    pinned_brand: Option<Slug>,
}

impl FilterStore {
    /// Create an unscoped store with the all-empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FilterState::default(),
            pinned_brand: None,
        }
    }

    /// Create a store scoped to a single brand's listing page.
    ///
    /// The brand is pinned: it survives [`clear`](Self::clear), shopper
    /// edits always re-include it, and URL `brands` parameters never
    /// replace it.
    #[must_use]
    pub fn scoped_to_brand(brand: Slug) -> Self {
        let mut state = FilterState::default();
        state.brands.insert(brand.clone());
        Self {
            state,
            pinned_brand: Some(brand),
        }
    }

    /// The current filter state.
    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    /// The pinned brand, if this store is brand-scoped.
    #[must_use]
    pub const fn pinned_brand(&self) -> Option<&Slug> {
        self.pinned_brand.as_ref()
    }

    /// Replace the entire filter state.
    ///
    /// Shopper edits that change anything besides `page` force `page` back
    /// to 0: a filter change must never be combined with a stale page
    /// offset. Hydration keeps the page the URL carried, so deep links land
    /// on the right page.
    ///
    /// Returns `true` when the listing itself changed (any non-page field).
    pub fn apply(&mut self, mut next: FilterState, origin: ChangeOrigin) -> bool {
        next.normalize();

        if let Some(pinned) = &self.pinned_brand {
            match origin {
                ChangeOrigin::UserEdit => {
                    next.brands.insert(pinned.clone());
                }
                ChangeOrigin::UrlHydration => {
                    next.brands = BTreeSet::from([pinned.clone()]);
                }
            }
        }

        let listing_changed = !next.eq_ignoring_page(&self.state);
        if listing_changed && origin == ChangeOrigin::UserEdit {
            next.page = 0;
        }

        self.state = next;
        listing_changed
    }

    /// Reset to the all-empty state with `page = 0`.
    ///
    /// A pinned brand survives the reset.
    ///
    /// Returns `true` when the listing changed.
    pub fn clear(&mut self) -> bool {
        let mut next = FilterState::default();
        if let Some(pinned) = &self.pinned_brand {
            next.brands.insert(pinned.clone());
        }

        let listing_changed = !next.eq_ignoring_page(&self.state);
        self.state = next;
        listing_changed
    }

    /// Update only the pagination anchor, leaving every filter untouched.
    pub fn set_page(&mut self, page: u32) {
        self.state.page = page;
    }

    /// Whether the shopper has any clearable filter active.
    ///
    /// The pinned brand is the page's identity, not a shopper choice, so it
    /// does not count.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        let clearable_brands = match &self.pinned_brand {
            Some(pinned) => self.state.brands.iter().any(|b| b != pinned),
            None => !self.state.brands.is_empty(),
        };

        clearable_brands
            || !self.state.categories.is_empty()
            || self.state.attributes.values().any(|opts| !opts.is_empty())
            || self.state.instock
            || self.state.sort.is_some()
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn slug(s: &str) -> Slug {
        Slug::parse(s).unwrap()
    }

    fn state_with_sort_and_page() -> FilterState {
        FilterState {
            sort: Some(SortOrder::PriceDesc),
            page: 3,
            ..FilterState::default()
        }
    }

    #[test]
    fn test_user_edit_resets_page() {
        // Scenario: sorted listing on page 3, shopper toggles the
        // in-stock filter. The new state must land on page 0.
        let mut store = FilterStore::new();
        store.apply(state_with_sort_and_page(), ChangeOrigin::UrlHydration);
        assert_eq!(store.state().page, 3);

        let mut next = store.state().clone();
        next.instock = true;
        let changed = store.apply(next, ChangeOrigin::UserEdit);

        assert!(changed);
        assert!(store.state().instock);
        assert_eq!(store.state().sort, Some(SortOrder::PriceDesc));
        assert_eq!(store.state().page, 0);
    }

    #[test]
    fn test_page_only_edit_keeps_page() {
        let mut store = FilterStore::new();
        let mut next = store.state().clone();
        next.page = 2;
        let changed = store.apply(next, ChangeOrigin::UserEdit);

        assert!(!changed);
        assert_eq!(store.state().page, 2);
    }

    #[test]
    fn test_hydration_keeps_deep_link_page() {
        let mut store = FilterStore::new();
        let mut next = FilterState::default();
        next.categories.insert(slug("espresso"));
        next.page = 5;

        let changed = store.apply(next, ChangeOrigin::UrlHydration);

        assert!(changed);
        assert_eq!(store.state().page, 5);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = FilterStore::new();
        let mut next = FilterState::default();
        next.categories.insert(slug("grinders"));
        next.instock = true;
        next.sort = Some(SortOrder::Rating);
        next.page = 4;
        store.apply(next, ChangeOrigin::UrlHydration);

        let changed = store.clear();

        assert!(changed);
        assert_eq!(store.state(), &FilterState::default());
        assert!(!store.has_active_filters());
    }

    #[test]
    fn test_pinned_brand_survives_clear() {
        let mut store = FilterStore::scoped_to_brand(slug("acme"));
        let mut next = store.state().clone();
        next.categories.insert(slug("kettles"));
        next.instock = true;
        store.apply(next, ChangeOrigin::UserEdit);

        store.clear();

        assert_eq!(
            store.state().brands,
            BTreeSet::from([slug("acme")]),
            "pinned brand must survive clear"
        );
        assert!(store.state().categories.is_empty());
        assert!(!store.state().instock);
        assert_eq!(store.state().page, 0);
    }

    #[test]
    fn test_pinned_brand_ignores_url_brands() {
        let mut store = FilterStore::scoped_to_brand(slug("acme"));
        let mut next = FilterState::default();
        next.brands.insert(slug("rival"));

        store.apply(next, ChangeOrigin::UrlHydration);

        assert_eq!(store.state().brands, BTreeSet::from([slug("acme")]));
    }

    #[test]
    fn test_pinned_brand_reincluded_on_user_edit() {
        let mut store = FilterStore::scoped_to_brand(slug("acme"));
        let next = FilterState::default();

        store.apply(next, ChangeOrigin::UserEdit);

        assert_eq!(store.state().brands, BTreeSet::from([slug("acme")]));
    }

    #[test]
    fn test_pinned_brand_not_counted_as_active() {
        let mut store = FilterStore::scoped_to_brand(slug("acme"));
        assert!(!store.has_active_filters());

        let mut next = store.state().clone();
        next.instock = true;
        store.apply(next, ChangeOrigin::UserEdit);
        assert!(store.has_active_filters());
    }

    #[test]
    fn test_empty_attribute_sets_normalized_away() {
        let mut store = FilterStore::new();
        let mut next = FilterState::default();
        next.attributes.insert("pa_colour".to_string(), BTreeSet::new());

        let changed = store.apply(next, ChangeOrigin::UserEdit);

        assert!(!changed);
        assert!(store.state().attributes.is_empty());
    }

    #[test]
    fn test_has_active_filters_on_state() {
        let mut state = FilterState::default();
        assert!(!state.has_active_filters());

        state.sort = Some(SortOrder::Latest);
        assert!(state.has_active_filters());

        state.sort = None;
        state.page = 7;
        assert!(!state.has_active_filters(), "page alone is not a filter");
    }
}
