//! HTTP route handlers for the storefront listing API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//!
//! # Listings (JSON)
//! GET  /products                 - Product listing
//! GET  /products/sale            - On-sale product listing
//! GET  /brands                   - Brand listing
//! GET  /brands/{slug}/products   - One brand's product listing
//! GET  /posts                    - Blog post listing
//! ```
//!
//! Every listing endpoint reads its filter, sort, and pagination state out
//! of the request's query string, runs the catalog engine's replace fetch,
//! and echoes the canonical query string back so clients can compare it
//! with what they sent. Unrelated parameters (`s`, campaign tags) survive
//! the round trip.

pub mod brands;
pub mod posts;
pub mod products;

use axum::{Router, routing::get};
use serde::Serialize;
use url::Url;

use bramble_catalog::{CatalogConfig, CatalogController, CatalogSource, FilterState};

use crate::config::StorefrontConfig;
use crate::state::AppState;

/// Create the storefront routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/sale", get(products::sale))
        .route("/brands", get(brands::index))
        .route("/brands/{slug}/products", get(brands::products))
        .route("/posts", get(posts::index))
}

/// JSON body of every listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListingResponse<T> {
    /// The materialized page of items.
    pub items: Vec<T>,
    /// Server-side total matching count.
    pub found: u64,
    /// The anchored page index.
    pub page: u32,
    /// One-based start of the "Viewing X-Y of N" range.
    pub viewing_from: u64,
    /// One-based end of the "Viewing X-Y of N" range.
    pub viewing_to: u64,
    /// Whether more items exist past this page.
    pub has_more: bool,
    /// Whether pages exist before this one.
    pub has_previous: bool,
    /// Whether any clearable filter is active.
    pub has_active_filters: bool,
    /// The canonical filter state the listing was computed from.
    pub filters: FilterState,
    /// The canonical query string for this listing, `None` when clean.
    pub canonical_query: Option<String>,
}

/// Hydrate a controller from the request URL, run the replace fetch, and
/// shape the window into a response.
///
/// A failed fetch has already been logged by the engine and leaves an
/// empty window; the listing still renders rather than erroring.
pub(crate) async fn run_listing<S: CatalogSource>(
    source: S,
    url: Url,
    config: CatalogConfig,
) -> ListingResponse<S::Item> {
    let controller = CatalogController::new(source, url, config);
    controller.hydrate().await;

    let snapshot = controller.snapshot();
    ListingResponse {
        items: snapshot.items,
        found: snapshot.found,
        page: snapshot.current_page,
        viewing_from: snapshot.viewing.from,
        viewing_to: snapshot.viewing.to,
        has_more: snapshot.has_more,
        has_previous: !snapshot.has_first_page,
        has_active_filters: controller.has_active_filters(),
        filters: controller.filter_state(),
        canonical_query: controller.current_url().query().map(String::from),
    }
}

/// Engine configuration for one listing request.
pub(crate) fn catalog_config(
    config: &StorefrontConfig,
    pinned_brand: Option<bramble_core::Slug>,
) -> CatalogConfig {
    CatalogConfig {
        per_page: config.catalog.page_size,
        taxonomies: config.catalog.attributes.clone(),
        pinned_brand,
    }
}

/// Read one query parameter out of a URL.
pub(crate) fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
