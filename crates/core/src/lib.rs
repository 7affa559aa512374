//! Bramble Core - Shared types library.
//!
//! This crate provides common types used across all Bramble components:
//! - `catalog` - Generic filter/pagination engine for listing pages
//! - `storefront` - WooCommerce GraphQL client and JSON listing surface
//! - `cli` - Command-line catalog browser
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Slugs, sort orders, and stock statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
