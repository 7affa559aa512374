//! Product listing route handlers.

use axum::{
    Json,
    extract::{RawQuery, State},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::{ListingResponse, catalog_config, query_param, run_listing};
use crate::state::AppState;
use crate::woo::{Product, ProductCatalog};

/// Product listing with the full filter surface: categories, brands,
/// attributes, stock, sort, pagination, plus the `s` search passthrough.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListingResponse<Product>>> {
    let url = state
        .config()
        .listing_url("/products", query.as_deref())
        .map_err(|e| AppError::Internal(format!("listing url: {e}")))?;

    let source = ProductCatalog::new(state.woo().clone()).with_search(query_param(&url, "s"));
    let response = run_listing(source, url, catalog_config(state.config(), None)).await;
    Ok(Json(response))
}

/// Sale landing page: the product listing scoped to on-sale items.
#[instrument(skip(state))]
pub async fn sale(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListingResponse<Product>>> {
    let url = state
        .config()
        .listing_url("/products/sale", query.as_deref())
        .map_err(|e| AppError::Internal(format!("listing url: {e}")))?;

    let source = ProductCatalog::new(state.woo().clone())
        .with_search(query_param(&url, "s"))
        .with_on_sale(true);
    let response = run_listing(source, url, catalog_config(state.config(), None)).await;
    Ok(Json(response))
}
