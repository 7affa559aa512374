//! WooCommerce GraphQL client implementation.
//!
//! Posts `graphql_client` query bodies with `reqwest` and parses its
//! response envelope. List responses are cached with `moka` (5-minute TTL)
//! unless the query carries a free-text search term.

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{QueryBody, Response};
use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use bramble_catalog::ListPage;

use crate::config::WooConfig;

use super::cache::CacheValue;
use super::conversions::{
    convert_brand_connection, convert_post_connection, convert_product_connection,
};
use super::queries::{
    BrandWhereArgs, PostWhereArgs, ProductWhereArgs, brand_list, post_list, product_list,
};
use super::types::{Brand, Post, Product};
use super::{GraphQLError, GraphQLErrorLocation, WooError};

// =============================================================================
// WooClient
// =============================================================================

/// Client for the WooCommerce GraphQL API.
///
/// Provides the three list queries the catalog engine consumes. List
/// responses are cached for 5 minutes keyed on their query arguments.
#[derive(Clone)]
pub struct WooClient {
    inner: Arc<WooClientInner>,
}

struct WooClientInner {
    client: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
    cache: Cache<String, CacheValue>,
}

impl WooClient {
    /// Create a new WooCommerce API client.
    #[must_use]
    pub fn new(config: &WooConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(WooClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                bearer_token: config.bearer_token(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<V, D>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<D, WooError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let request_body = QueryBody {
            variables,
            query,
            operation_name,
        };

        let mut request = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body);
        if let Some(token) = &self.inner.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(WooError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        // Check for non-success status codes
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "WooCommerce API returned non-success status"
            );
            return Err(WooError::GraphQL(vec![GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        // Parse the response
        let response: Response<D> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse WooCommerce GraphQL response"
                );
                return Err(WooError::Parse(e));
            }
        };

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");

            return Err(WooError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "WooCommerce GraphQL response has no data and no errors"
            );
            WooError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    // =========================================================================
    // List Queries
    // =========================================================================

    /// Query one page of the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn query_product_list(
        &self,
        where_: ProductWhereArgs,
        first: i64,
    ) -> Result<ListPage<Product>, WooError> {
        let cache_key = cache_key("products", &where_)?;

        // Check cache (only for queries without a search term)
        if where_.search.is_none()
            && let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for product list");
            return Ok(page);
        }

        let cacheable = where_.search.is_none();
        let variables = product_list::Variables { first, where_ };
        let data: product_list::ResponseData = self
            .execute(product_list::OPERATION_NAME, product_list::QUERY, variables)
            .await?;

        let page = convert_product_connection(data.products.unwrap_or_else(|| {
            product_list::ProductConnection {
                found: None,
                nodes: Vec::new(),
            }
        }));

        if cacheable {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Query one page of the brand list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn query_brand_list(
        &self,
        where_: BrandWhereArgs,
        first: i64,
    ) -> Result<ListPage<Brand>, WooError> {
        let cache_key = cache_key("brands", &where_)?;

        if where_.search.is_none()
            && let Some(CacheValue::Brands(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for brand list");
            return Ok(page);
        }

        let cacheable = where_.search.is_none();
        let variables = brand_list::Variables { first, where_ };
        let data: brand_list::ResponseData = self
            .execute(brand_list::OPERATION_NAME, brand_list::QUERY, variables)
            .await?;

        let page =
            convert_brand_connection(data.product_brands.unwrap_or_else(|| {
                brand_list::BrandConnection {
                    found: None,
                    nodes: Vec::new(),
                }
            }));

        if cacheable {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Brands(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Query one page of the post list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn query_post_list(
        &self,
        where_: PostWhereArgs,
        first: i64,
    ) -> Result<ListPage<Post>, WooError> {
        let cache_key = cache_key("posts", &where_)?;

        if where_.search.is_none()
            && let Some(CacheValue::Posts(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for post list");
            return Ok(page);
        }

        let cacheable = where_.search.is_none();
        let variables = post_list::Variables { first, where_ };
        let data: post_list::ResponseData = self
            .execute(post_list::OPERATION_NAME, post_list::QUERY, variables)
            .await?;

        let page = convert_post_connection(data.posts.unwrap_or_else(|| post_list::PostConnection {
            found: None,
            nodes: Vec::new(),
        }));

        if cacheable {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Posts(page.clone()))
                .await;
        }

        Ok(page)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached list responses.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Cache key from a query's serialized arguments.
fn cache_key<W: Serialize>(domain: &str, where_: &W) -> Result<String, WooError> {
    Ok(format!("{domain}:{}", serde_json::to_string(where_)?))
}
