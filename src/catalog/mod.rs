//! Catalog model and ordered index construction.
//!
//! - [`model`] - Item, category and status types
//! - [`source`] - Catalog query trait and backends
//! - [`builder`] - Exclusion sets, ordered indexes and the index builder

pub mod builder;
pub mod model;
pub mod source;
