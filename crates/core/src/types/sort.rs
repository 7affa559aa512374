//! Catalog sort orders.

use serde::{Deserialize, Serialize};

/// Sort order for catalog listings.
///
/// The variants mirror the WooCommerce `orderby` vocabulary. The engine
/// treats "no sort selected" as `None` rather than a default variant, so
/// a listing URL stays clean until the shopper picks an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest products first.
    Latest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Best sellers first.
    Popularity,
    /// Highest rated first.
    Rating,
}

impl SortOrder {
    /// The query-parameter key for this sort order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Popularity => "popularity",
            Self::Rating => "rating",
        }
    }

    /// Parse a query-parameter value into a sort order.
    ///
    /// Unknown keys yield `None`; a malformed `sort` parameter must never
    /// break a listing page.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "latest" => Some(Self::Latest),
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "popularity" => Some(Self::Popularity),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for sort in [
            SortOrder::Latest,
            SortOrder::PriceAsc,
            SortOrder::PriceDesc,
            SortOrder::Popularity,
            SortOrder::Rating,
        ] {
            assert_eq!(SortOrder::parse(sort.as_str()), Some(sort));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(SortOrder::parse("cheapest"), None);
        assert_eq!(SortOrder::parse(""), None);
        assert_eq!(SortOrder::parse("PRICE_DESC"), None);
    }
}
