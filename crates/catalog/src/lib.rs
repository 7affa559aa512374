//! Bramble Catalog - filter, pagination, and URL state engine.
//!
//! Product, brand, and post listing pages all share the same three-way
//! synchronization problem: filter selections, the browser URL, and a
//! server-fetched paginated window must stay consistent under filter edits,
//! deep links, back/forward navigation, and bidirectional "load more" /
//! "load previous" paging - without a backend consistency guarantee between
//! requests. This crate implements that synchronization once, generically,
//! instead of once per listing domain.
//!
//! # Architecture
//!
//! - [`filter`] - canonical filter state and its store, including the
//!   page-reset invariant and brand-scoped pinning
//! - [`urlsync`] - bidirectional mapping between filter state and URL query
//!   parameters, preserving unrelated parameters
//! - [`history`] - the engine's model of the browser history collaborator
//! - [`source`] - the remote list query contract
//! - [`controller`] - the paginated fetch controller tying it all together
//!
//! # Example
//!
//! ```rust,ignore
//! use bramble_catalog::{CatalogConfig, CatalogController};
//!
//! let controller = CatalogController::new(source, page_url, CatalogConfig::default());
//! controller.hydrate().await;
//! controller.load_more().await;
//! let snapshot = controller.snapshot();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod controller;
pub mod filter;
pub mod history;
pub mod source;
pub mod urlsync;

pub use controller::{CatalogConfig, CatalogController, CatalogSnapshot, LoadingFlags, Outcome, ViewRange};
pub use filter::{ChangeOrigin, FilterState, FilterStore};
pub use history::{History, HistoryMode};
pub use source::{CatalogSource, ListPage, PageRequest};
pub use urlsync::UrlSync;
