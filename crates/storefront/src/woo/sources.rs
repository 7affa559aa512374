//! Catalog sources: the bridge from the generic engine to the WooCommerce
//! list queries.
//!
//! Each listing domain supplies one [`CatalogSource`] implementation whose
//! only job is mapping [`FilterState`] onto its query's `where` arguments.
//! Free-text search and sale scoping are page-level construction
//! parameters, not filter state: they arrive as passthrough URL parameters
//! the engine preserves but does not own.

use bramble_catalog::{CatalogSource, FilterState, ListPage, PageRequest};
use bramble_core::{Slug, SortOrder, StockStatus};

use super::WooError;
use super::client::WooClient;
use super::queries::{
    AttributeFilter, BrandWhereArgs, OrderDirection, OrderField, OrderbyInput, PostWhereArgs,
    ProductWhereArgs,
};
use super::types::{Brand, Post, Product};

fn slug_vec(slugs: &std::collections::BTreeSet<Slug>) -> Option<Vec<String>> {
    if slugs.is_empty() {
        return None;
    }
    Some(slugs.iter().map(ToString::to_string).collect())
}

fn attribute_filters(filter: &FilterState) -> Option<Vec<AttributeFilter>> {
    if filter.attributes.is_empty() {
        return None;
    }
    Some(
        filter
            .attributes
            .iter()
            .map(|(taxonomy, terms)| AttributeFilter {
                taxonomy: taxonomy.clone(),
                terms: terms.iter().map(ToString::to_string).collect(),
            })
            .collect(),
    )
}

const fn product_orderby(sort: SortOrder) -> OrderbyInput {
    match sort {
        SortOrder::Latest => OrderbyInput {
            field: OrderField::Date,
            order: OrderDirection::Desc,
        },
        SortOrder::PriceAsc => OrderbyInput {
            field: OrderField::Price,
            order: OrderDirection::Asc,
        },
        SortOrder::PriceDesc => OrderbyInput {
            field: OrderField::Price,
            order: OrderDirection::Desc,
        },
        SortOrder::Popularity => OrderbyInput {
            field: OrderField::Popularity,
            order: OrderDirection::Desc,
        },
        SortOrder::Rating => OrderbyInput {
            field: OrderField::Rating,
            order: OrderDirection::Desc,
        },
    }
}

// =============================================================================
// Products
// =============================================================================

/// Product listing source.
#[derive(Clone)]
pub struct ProductCatalog {
    client: WooClient,
    search: Option<String>,
    on_sale: Option<bool>,
}

impl ProductCatalog {
    /// Create a product source over the given client.
    #[must_use]
    pub const fn new(client: WooClient) -> Self {
        Self {
            client,
            search: None,
            on_sale: None,
        }
    }

    /// Scope every fetch to a free-text search term.
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }

    /// Scope every fetch to on-sale products (sale landing pages).
    #[must_use]
    pub const fn with_on_sale(mut self, on_sale: bool) -> Self {
        self.on_sale = Some(on_sale);
        self
    }
}

impl CatalogSource for ProductCatalog {
    type Item = Product;
    type Error = WooError;

    async fn fetch_page(
        &self,
        filter: &FilterState,
        page: PageRequest,
    ) -> Result<ListPage<Product>, WooError> {
        let where_ = ProductWhereArgs {
            category_in: slug_vec(&filter.categories),
            brand_in: slug_vec(&filter.brands),
            attribute_filters: attribute_filters(filter),
            stock_status: filter.instock.then_some(StockStatus::InStock),
            order_by: filter.sort.map(|s| vec![product_orderby(s)]),
            offset: page.offset(),
            per_page: page.per_page,
            search: self.search.clone(),
            on_sale: self.on_sale,
        };

        self.client
            .query_product_list(where_, i64::from(page.per_page))
            .await
    }
}

// =============================================================================
// Brands
// =============================================================================

/// Brand listing source.
///
/// Brands are a flat taxonomy: only sort and the search passthrough apply;
/// the engine's other filter dimensions have nothing to map onto and are
/// ignored.
#[derive(Clone)]
pub struct BrandCatalog {
    client: WooClient,
    search: Option<String>,
}

impl BrandCatalog {
    /// Create a brand source over the given client.
    #[must_use]
    pub const fn new(client: WooClient) -> Self {
        Self {
            client,
            search: None,
        }
    }

    /// Scope every fetch to a free-text search term.
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }
}

impl CatalogSource for BrandCatalog {
    type Item = Brand;
    type Error = WooError;

    async fn fetch_page(
        &self,
        filter: &FilterState,
        page: PageRequest,
    ) -> Result<ListPage<Brand>, WooError> {
        // Brands list alphabetically unless a sort is chosen; the price
        // orders are meaningless here and fall back to name order too.
        let order_by = match filter.sort {
            Some(SortOrder::Popularity) => Some(vec![OrderbyInput {
                field: OrderField::Popularity,
                order: OrderDirection::Desc,
            }]),
            _ => Some(vec![OrderbyInput {
                field: OrderField::Name,
                order: OrderDirection::Asc,
            }]),
        };

        let where_ = BrandWhereArgs {
            order_by,
            offset: page.offset(),
            per_page: page.per_page,
            search: self.search.clone(),
        };

        self.client
            .query_brand_list(where_, i64::from(page.per_page))
            .await
    }
}

// =============================================================================
// Posts
// =============================================================================

/// Blog post listing source.
#[derive(Clone)]
pub struct PostCatalog {
    client: WooClient,
    search: Option<String>,
}

impl PostCatalog {
    /// Create a post source over the given client.
    #[must_use]
    pub const fn new(client: WooClient) -> Self {
        Self {
            client,
            search: None,
        }
    }

    /// Scope every fetch to a free-text search term.
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }
}

impl CatalogSource for PostCatalog {
    type Item = Post;
    type Error = WooError;

    async fn fetch_page(
        &self,
        filter: &FilterState,
        page: PageRequest,
    ) -> Result<ListPage<Post>, WooError> {
        // Posts always read newest-first; category filters carry over,
        // product-specific dimensions do not exist here.
        let where_ = PostWhereArgs {
            category_in: slug_vec(&filter.categories),
            order_by: Some(vec![OrderbyInput {
                field: OrderField::Date,
                order: OrderDirection::Desc,
            }]),
            offset: page.offset(),
            per_page: page.per_page,
            search: self.search.clone(),
        };

        self.client
            .query_post_list(where_, i64::from(page.per_page))
            .await
    }
}
