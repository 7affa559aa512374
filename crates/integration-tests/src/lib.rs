//! Integration tests for Bramble.
//!
//! The tests drive the real catalog engine and WooCommerce client against a
//! `wiremock` GraphQL server, and the axum listing routes via
//! `tower::ServiceExt::oneshot`. No live store is required.
//!
//! # Test Categories
//!
//! - `catalog_flow` - engine + client end to end (pagination, filters,
//!   pinned brands, error degradation)
//! - `listing_routes` - the JSON listing endpoints
//!
//! This crate's library provides the shared fixtures below.

use secrecy::SecretString;
use serde_json::{Value, json};

use bramble_storefront::config::{CatalogSettings, StorefrontConfig, WooConfig};

/// Storefront configuration pointing at a mock GraphQL endpoint.
#[must_use]
pub fn test_config(graphql_endpoint: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("literal addr"),
        port: 0,
        base_url: "https://shop.test".to_string(),
        woo: WooConfig {
            endpoint: graphql_endpoint.to_string(),
            auth_token: None,
        },
        catalog: CatalogSettings {
            page_size: 24,
            attributes: vec!["pa_colour".to_string(), "pa_size".to_string()],
        },
        sentry_dsn: None,
    }
}

/// Same configuration with a bearer token, for auth header tests.
#[must_use]
pub fn test_config_with_token(graphql_endpoint: &str, token: &str) -> StorefrontConfig {
    let mut config = test_config(graphql_endpoint);
    config.woo.auth_token = Some(SecretString::from(token.to_string()));
    config
}

/// A `products` GraphQL payload holding `count` sequential products
/// starting at id `start`.
#[must_use]
pub fn product_page(start: u64, count: u64, found: u64) -> Value {
    let nodes: Vec<Value> = (start..start + count)
        .map(|id| {
            json!({
                "databaseId": id,
                "slug": format!("product-{id}"),
                "name": format!("Product {id}"),
                "onSale": false,
                "stockStatus": "IN_STOCK",
                "price": "12.50",
                "regularPrice": null,
                "image": null
            })
        })
        .collect();

    json!({ "data": { "products": { "found": found, "nodes": nodes } } })
}

/// An empty `products` payload with a (possibly inconsistent) total.
#[must_use]
pub fn empty_product_page(found: u64) -> Value {
    json!({ "data": { "products": { "found": found, "nodes": [] } } })
}

/// A `productBrands` payload.
#[must_use]
pub fn brand_page(slugs: &[&str], found: u64) -> Value {
    let nodes: Vec<Value> = slugs
        .iter()
        .enumerate()
        .map(|(i, slug)| {
            json!({
                "databaseId": i + 1,
                "slug": slug,
                "name": slug.to_uppercase(),
                "count": 3
            })
        })
        .collect();

    json!({ "data": { "productBrands": { "found": found, "nodes": nodes } } })
}

/// A `posts` payload.
#[must_use]
pub fn post_page(slugs: &[&str], found: u64) -> Value {
    let nodes: Vec<Value> = slugs
        .iter()
        .enumerate()
        .map(|(i, slug)| {
            json!({
                "databaseId": i + 1,
                "slug": slug,
                "title": format!("Post about {slug}"),
                "date": "2026-02-10T08:00:00",
                "excerpt": "..."
            })
        })
        .collect();

    json!({ "data": { "posts": { "found": found, "nodes": nodes } } })
}
