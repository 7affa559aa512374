//! Blog post listing route handlers.

use axum::{
    Json,
    extract::{RawQuery, State},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::{ListingResponse, catalog_config, query_param, run_listing};
use crate::state::AppState;
use crate::woo::{Post, PostCatalog};

/// Blog post listing: category filters, pagination, search passthrough.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListingResponse<Post>>> {
    let url = state
        .config()
        .listing_url("/posts", query.as_deref())
        .map_err(|e| AppError::Internal(format!("listing url: {e}")))?;

    let source = PostCatalog::new(state.woo().clone()).with_search(query_param(&url, "s"));
    let response = run_listing(source, url, catalog_config(state.config(), None)).await;
    Ok(Json(response))
}
