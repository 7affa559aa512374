//! Domain views of WooCommerce entities.
//!
//! These are the shapes the listing surface serves; wire nodes from
//! [`queries`](super::queries) convert into them and the raw GraphQL types
//! never leave the `woo` module.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use bramble_core::{Slug, StockStatus};

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub alt: Option<String>,
}

/// A product as shown on listing pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u64,
    pub slug: Slug,
    pub name: String,
    /// Current price; `None` when the API withholds or mangles it.
    pub price: Option<Decimal>,
    /// Pre-sale price, shown struck through next to a sale price.
    pub regular_price: Option<Decimal>,
    pub on_sale: bool,
    pub stock_status: StockStatus,
    pub image: Option<Image>,
}

/// A brand as shown on the brand listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub id: u64,
    pub slug: Slug,
    pub name: String,
    /// Number of products carrying the brand.
    pub product_count: u64,
}

/// A blog post as shown on the post listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: u64,
    pub slug: Slug,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub excerpt: Option<String>,
}
