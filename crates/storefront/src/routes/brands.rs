//! Brand listing route handlers.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use tracing::instrument;

use bramble_core::Slug;

use crate::error::{AppError, Result};
use crate::routes::{ListingResponse, catalog_config, query_param, run_listing};
use crate::state::AppState;
use crate::woo::{Brand, BrandCatalog, Product, ProductCatalog};

/// Brand directory listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListingResponse<Brand>>> {
    let url = state
        .config()
        .listing_url("/brands", query.as_deref())
        .map_err(|e| AppError::Internal(format!("listing url: {e}")))?;

    let source = BrandCatalog::new(state.woo().clone()).with_search(query_param(&url, "s"));
    let response = run_listing(source, url, catalog_config(state.config(), None)).await;
    Ok(Json(response))
}

/// One brand's product listing.
///
/// The brand from the path is pinned: `brands` query parameters cannot
/// override it and clearing filters keeps it.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListingResponse<Product>>> {
    let brand = Slug::parse(&slug)
        .map_err(|e| AppError::BadRequest(format!("invalid brand slug: {e}")))?;

    let url = state
        .config()
        .listing_url(&format!("/brands/{brand}/products"), query.as_deref())
        .map_err(|e| AppError::Internal(format!("listing url: {e}")))?;

    let source = ProductCatalog::new(state.woo().clone()).with_search(query_param(&url, "s"));
    let response = run_listing(source, url, catalog_config(state.config(), Some(brand))).await;
    Ok(Json(response))
}
