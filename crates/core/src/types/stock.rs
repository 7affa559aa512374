//! Product stock status.

use serde::{Deserialize, Serialize};

/// Stock status of a product.
///
/// Maps to WooCommerce's stock status values; serialized in the
/// SCREAMING_SNAKE_CASE form the GraphQL API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
}

impl StockStatus {
    /// Whether this status counts as purchasable for the in-stock filter.
    #[must_use]
    pub const fn is_in_stock(self) -> bool {
        matches!(self, Self::InStock)
    }
}
