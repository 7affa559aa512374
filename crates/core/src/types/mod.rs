//! Core types for Bramble.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod slug;
pub mod sort;
pub mod stock;

pub use slug::{Slug, SlugError};
pub use sort::SortOrder;
pub use stock::StockStatus;
