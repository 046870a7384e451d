//! loopnav - looped previous/next navigation over a filtered catalog.
//!
//! For the item being viewed, loopnav answers "which item comes before and
//! after this one?" in a catalog ordering that leaves out every item belonging
//! to a configured set of categories. Navigation wraps around: the last item's
//! next is the first item, and the first item's previous is the last.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Host (renderer / CLI)                    │
//! │      current item id ──>        <── (prev, next)         │
//! └──────────────────────────────────────────────────────────┘
//!                 │                          ▲
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Navigation Resolver                      │
//! │   locate current │ circular neighbors │ event wiring     │
//! └──────────────────────────────────────────────────────────┘
//!                 │                          ▲
//! ┌──────────────────────────────────────────────────────────┐
//! │      Index Cache (TTL, keyed by exclusion fingerprint)   │
//! └──────────────────────────────────────────────────────────┘
//!                 │                          ▲
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Catalog Index Builder                    │
//! │      query published │ exclude categories │ sort         │
//! └──────────────────────────────────────────────────────────┘
//!                 │
//!           Catalog source
//! ```
//!
//! # Module Organization
//!
//! ## Core
//! - [`core::config`] - Configuration parsing and validation
//! - [`core::error`] - Error types
//! - [`core::time`] - Clocks for cache expiry
//!
//! ## Catalog
//! - [`catalog::model`] - Items, categories, statuses
//! - [`catalog::source`] - Catalog query trait, in-memory and file backends
//! - [`catalog::builder`] - Exclusion sets and ordered index construction
//!
//! ## Navigation
//! - [`nav::cache`] - Index cache and freshness
//! - [`nav::resolver`] - Neighbor resolution
//! - [`nav::events`] - Mutation events and invalidation
//!
//! ## CLI
//! - [`cli::commands`] - CLI command implementations
//!
//! # Example
//!
//! ```
//! use loopnav::catalog::model::{CatalogItem, CategoryId, ItemId};
//! use loopnav::catalog::source::InMemoryCatalog;
//! use loopnav::nav::cache::IndexCache;
//! use loopnav::nav::resolver::NavigationResolver;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let catalog = Arc::new(InMemoryCatalog::new(vec![
//!     CatalogItem::new(1, 1, "A"),
//!     CatalogItem::new(2, 2, "B").in_category(7),
//!     CatalogItem::new(3, 3, "C"),
//! ]));
//! let cache = Arc::new(IndexCache::with_system_clock(Duration::from_secs(60)).unwrap());
//! let resolver = NavigationResolver::new(catalog, cache);
//! let exclusions = [CategoryId(7)].into_iter().collect();
//!
//! let neighbors = resolver.resolve_neighbors(ItemId(1), &exclusions).unwrap();
//! assert_eq!(neighbors.prev, Some(ItemId(3)));
//! assert_eq!(neighbors.next, Some(ItemId(3)));
//! ```
//!
//! # Key Invariants
//!
//! - The ordered index never holds an unpublished or excluded item, nor the
//!   same id twice
//! - Ordering is `(menu_order, title, id)` ascending
//! - A cached index is served only while fresh and is replaced whole
//! - Catalog failures are errors; missing neighbors are not

// Core infrastructure
pub mod core;

// Catalog model and index building
pub mod catalog;

// Cache and resolution
pub mod nav;

// CLI
pub mod cli;

// Re-exports for convenience
pub use self::core::{config, error, time};
pub use catalog::builder::{ExclusionSet, IndexBuilder, OrderedIndex};
pub use catalog::model::{CatalogItem, CategoryId, ItemId, ItemStatus};
pub use nav::resolver::{NavOutcome, NavigationResolver, Neighbors};
