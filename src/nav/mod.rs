//! Navigation resolution.
//!
//! - [`cache`] - TTL cache of ordered indexes keyed by exclusion fingerprint
//! - [`resolver`] - Circular previous/next resolution
//! - [`events`] - Catalog mutation events and cache invalidation
//!
//! # Data Flow
//!
//! ```text
//! mutation event ──> invalidate ──> next request rebuilds ──> index cached
//!                                                                  │
//!          (prev, next) <── circular neighbors <── locate current ─┘
//! ```

pub mod cache;
pub mod events;
pub mod resolver;
