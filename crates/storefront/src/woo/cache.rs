//! Cache types for WooCommerce API list responses.

use bramble_catalog::ListPage;

use super::types::{Brand, Post, Product};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(ListPage<Product>),
    Brands(ListPage<Brand>),
    Posts(ListPage<Post>),
}
