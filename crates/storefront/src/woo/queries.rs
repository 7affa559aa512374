//! GraphQL operations for the WooCommerce (WPGraphQL + WooGraphQL) API.
//!
//! Each operation module carries its query document, `Variables`, and
//! `ResponseData` the way `graphql_client` codegen lays them out; the
//! structs are hand-maintained because the deployment ships no
//! introspection schema for the derive to consume.

use serde::{Deserialize, Serialize};

use bramble_core::StockStatus;

// =============================================================================
// Shared input types
// =============================================================================

/// One attribute taxonomy filter: match products carrying any of `terms`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttributeFilter {
    pub taxonomy: String,
    pub terms: Vec<String>,
}

/// Field a list can be ordered by.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderField {
    Date,
    Price,
    Popularity,
    Rating,
    Name,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// One `orderby` clause.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct OrderbyInput {
    pub field: OrderField,
    pub order: OrderDirection,
}

/// `where` arguments for the product list query.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductWhereArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_in: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_in: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_filters: Option<Vec<AttributeFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<StockStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderbyInput>>,
    pub offset: u64,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<bool>,
}

/// `where` arguments for the brand list query.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrandWhereArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderbyInput>>,
    pub offset: u64,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// `where` arguments for the post list query.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostWhereArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_in: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderbyInput>>,
    pub offset: u64,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

// =============================================================================
// Operations
// =============================================================================

pub mod product_list {
    use super::{Deserialize, ProductWhereArgs, Serialize};

    pub const OPERATION_NAME: &str = "ProductList";
    pub const QUERY: &str = r"
query ProductList($first: Int!, $where: ProductListWhereArgs) {
  products(first: $first, where: $where) {
    found
    nodes {
      databaseId
      slug
      name
      onSale
      stockStatus
      price
      regularPrice
      image {
        sourceUrl
        altText
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        #[serde(rename = "where")]
        pub where_: ProductWhereArgs,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Option<ProductConnection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductConnection {
        pub found: Option<i64>,
        #[serde(default)]
        pub nodes: Vec<ProductNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductNode {
        pub database_id: u64,
        pub slug: String,
        pub name: String,
        #[serde(default)]
        pub on_sale: bool,
        pub stock_status: Option<String>,
        pub price: Option<String>,
        pub regular_price: Option<String>,
        pub image: Option<ImageNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ImageNode {
        pub source_url: String,
        pub alt_text: Option<String>,
    }
}

pub mod brand_list {
    use super::{BrandWhereArgs, Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "BrandList";
    pub const QUERY: &str = r"
query BrandList($first: Int!, $where: BrandListWhereArgs) {
  productBrands(first: $first, where: $where) {
    found
    nodes {
      databaseId
      slug
      name
      count
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        #[serde(rename = "where")]
        pub where_: BrandWhereArgs,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_brands: Option<BrandConnection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct BrandConnection {
        pub found: Option<i64>,
        #[serde(default)]
        pub nodes: Vec<BrandNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BrandNode {
        pub database_id: u64,
        pub slug: String,
        pub name: String,
        pub count: Option<u64>,
    }
}

pub mod post_list {
    use super::{Deserialize, PostWhereArgs, Serialize};

    pub const OPERATION_NAME: &str = "PostList";
    pub const QUERY: &str = r"
query PostList($first: Int!, $where: PostListWhereArgs) {
  posts(first: $first, where: $where) {
    found
    nodes {
      databaseId
      slug
      title
      date
      excerpt
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        #[serde(rename = "where")]
        pub where_: PostWhereArgs,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub posts: Option<PostConnection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PostConnection {
        pub found: Option<i64>,
        #[serde(default)]
        pub nodes: Vec<PostNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PostNode {
        pub database_id: u64,
        pub slug: String,
        pub title: String,
        pub date: Option<String>,
        pub excerpt: Option<String>,
    }
}
