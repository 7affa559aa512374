//! Wire-node to domain-type conversion functions.
//!
//! All conversions are defensive: an unparseable price or date becomes
//! `None`, an unparseable slug drops the node with a warning. A listing
//! page renders whatever the API managed to say.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use bramble_catalog::ListPage;
use bramble_core::{Slug, StockStatus};

use super::queries::{brand_list, post_list, product_list};
use super::types::{Brand, Image, Post, Product};

pub fn convert_product_connection(conn: product_list::ProductConnection) -> ListPage<Product> {
    ListPage {
        found: found_count(conn.found),
        nodes: conn.nodes.into_iter().filter_map(convert_product).collect(),
    }
}

pub fn convert_brand_connection(conn: brand_list::BrandConnection) -> ListPage<Brand> {
    ListPage {
        found: found_count(conn.found),
        nodes: conn.nodes.into_iter().filter_map(convert_brand).collect(),
    }
}

pub fn convert_post_connection(conn: post_list::PostConnection) -> ListPage<Post> {
    ListPage {
        found: found_count(conn.found),
        nodes: conn.nodes.into_iter().filter_map(convert_post).collect(),
    }
}

fn convert_product(node: product_list::ProductNode) -> Option<Product> {
    let slug = parse_slug(&node.slug, "product")?;

    Some(Product {
        id: node.database_id,
        slug,
        name: node.name,
        price: node.price.as_deref().and_then(parse_price),
        regular_price: node.regular_price.as_deref().and_then(parse_price),
        on_sale: node.on_sale,
        stock_status: node
            .stock_status
            .as_deref()
            .map_or(StockStatus::InStock, parse_stock_status),
        image: node.image.map(|i| Image {
            url: i.source_url,
            alt: i.alt_text,
        }),
    })
}

fn convert_brand(node: brand_list::BrandNode) -> Option<Brand> {
    let slug = parse_slug(&node.slug, "brand")?;

    Some(Brand {
        id: node.database_id,
        slug,
        name: node.name,
        product_count: node.count.unwrap_or(0),
    })
}

fn convert_post(node: post_list::PostNode) -> Option<Post> {
    let slug = parse_slug(&node.slug, "post")?;

    Some(Post {
        id: node.database_id,
        slug,
        title: node.title,
        published_at: node.date.as_deref().and_then(parse_date),
        excerpt: node.excerpt.filter(|e| !e.is_empty()),
    })
}

fn found_count(found: Option<i64>) -> u64 {
    found.and_then(|f| u64::try_from(f).ok()).unwrap_or(0)
}

fn parse_slug(raw: &str, kind: &str) -> Option<Slug> {
    match Slug::parse(raw) {
        Ok(slug) => Some(slug),
        Err(e) => {
            warn!(slug = raw, kind, error = %e, "dropping node with unusable slug");
            None
        }
    }
}

/// Parse a WooCommerce price string.
///
/// WooGraphQL formats prices for display: currency symbols, thousands
/// separators, and `"12.00 - 18.00"` ranges for variable products (the
/// range collapses to its lower bound).
fn parse_price(raw: &str) -> Option<Decimal> {
    let first = raw.split('-').next().unwrap_or(raw);
    let cleaned: String = first
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn parse_stock_status(raw: &str) -> StockStatus {
    match raw {
        "OUT_OF_STOCK" => StockStatus::OutOfStock,
        "ON_BACKORDER" => StockStatus::OnBackorder,
        _ => StockStatus::InStock,
    }
}

/// Parse a WPGraphQL date.
///
/// The API serves site-local naive timestamps (`2026-03-01T09:30:00`);
/// RFC 3339 is accepted too in case the site sets a UTC offset.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
