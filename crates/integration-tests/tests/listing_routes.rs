//! Tests of the JSON listing endpoints via `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bramble_integration_tests::{brand_page, post_page, product_page, test_config};
use bramble_storefront::routes;
use bramble_storefront::state::AppState;

async fn app(server: &MockServer) -> axum::Router {
    let config = test_config(&format!("{}/graphql", server.uri()));
    routes::routes().with_state(AppState::new(config))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn products_listing_hydrates_filters_from_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(serde_json::json!({
            "operationName": "ProductList",
            "variables": { "where": {
                "offset": 0,
                "stockStatus": "IN_STOCK",
                "attributeFilters": [{ "taxonomy": "pa_colour", "terms": ["red"] }],
                "search": "shoes"
            } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page(1, 7, 7)))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(
        app(&server).await,
        "/products?instock=true&pa_colour=red&s=shoes",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], 7);
    assert_eq!(body["items"].as_array().unwrap().len(), 7);
    assert_eq!(body["page"], 0);
    assert_eq!(body["viewing_from"], 1);
    assert_eq!(body["viewing_to"], 7);
    assert_eq!(body["has_more"], false);
    assert_eq!(body["has_active_filters"], true);
    assert_eq!(body["filters"]["instock"], true);

    // The canonical query keeps the unrelated search parameter.
    let canonical = body["canonical_query"].as_str().unwrap();
    assert!(canonical.contains("s=shoes"));
    assert!(canonical.contains("instock=true"));
    assert!(canonical.contains("pa_colour=red"));

    server.verify().await;
}

#[tokio::test]
async fn products_listing_deep_link_page_sets_offset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(serde_json::json!({
            "variables": { "where": { "offset": 48 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page(49, 24, 90)))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server).await, "/products?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["viewing_from"], 49);
    assert_eq!(body["viewing_to"], 72);
    assert_eq!(body["has_previous"], true);
    assert_eq!(body["has_more"], true);

    server.verify().await;
}

#[tokio::test]
async fn fetch_failure_degrades_to_empty_listing_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server).await, "/products").await;

    assert_eq!(status, StatusCode::OK, "listing pages never 5xx on fetch failure");
    assert_eq!(body["found"], 0);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn brand_scoped_listing_pins_the_brand() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(serde_json::json!({
            "variables": { "where": { "brandIn": ["acme"] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page(1, 3, 3)))
        .expect(1)
        .mount(&server)
        .await;

    // A brands parameter in the URL cannot unseat the path's brand.
    let (status, body) = get_json(
        app(&server).await,
        "/brands/acme/products?brands=rival",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filters"]["brands"], serde_json::json!(["acme"]));
    assert_eq!(
        body["has_active_filters"], false,
        "the pin is the page's identity, not a clearable filter"
    );

    server.verify().await;
}

#[tokio::test]
async fn brand_scoped_listing_rejects_invalid_slug() {
    let server = MockServer::start().await;

    let (status, _) = get_json(app(&server).await, "/brands/not%20a%20slug/products").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn brands_and_posts_listings_respond() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(
            serde_json::json!({ "operationName": "BrandList" }),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(brand_page(&["acme", "rival"], 2)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(
            serde_json::json!({ "operationName": "PostList" }),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(post_page(&["brew-guide"], 1)),
        )
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server).await, "/brands").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], 2);
    assert_eq!(body["items"][0]["slug"], "acme");

    let (status, body) = get_json(app(&server).await, "/posts?categories=brewing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], 1);
    assert_eq!(body["items"][0]["slug"], "brew-guide");
    assert_eq!(body["filters"]["categories"], serde_json::json!(["brewing"]));
}
