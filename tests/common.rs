//! Common test utilities.
//!
//! This module contains shared helpers for integration tests.
//! Import with `mod common;` in test files.

#![allow(dead_code)]

use loopnav::catalog::model::{CatalogItem, ItemId};
use loopnav::catalog::source::InMemoryCatalog;
use loopnav::core::config::Config;
use loopnav::core::time::{ManualClock, Timestamp};
use loopnav::nav::cache::IndexCache;
use loopnav::nav::resolver::NavigationResolver;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

pub const A: ItemId = ItemId(1);
pub const B: ItemId = ItemId(2);
pub const C: ItemId = ItemId(3);
pub const D: ItemId = ItemId(4);

/// Category excluded in the reference scenario.
pub const X: u64 = 99;

/// `[A(1,{}), B(2,{X}), C(3,{}), D(4,{})]`.
pub fn reference_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(A.0, 1, "A"),
        CatalogItem::new(B.0, 2, "B").in_category(X),
        CatalogItem::new(C.0, 3, "C"),
        CatalogItem::new(D.0, 4, "D"),
    ]
}

/// A resolver, its catalog and clock, wired together.
pub struct Harness {
    pub catalog: Arc<InMemoryCatalog>,
    pub clock: Arc<ManualClock>,
    pub cache: Arc<IndexCache>,
    pub resolver: NavigationResolver,
}

/// Build a harness with a manual clock and the given TTL.
pub fn harness(items: Vec<CatalogItem>, ttl: Duration) -> Harness {
    let catalog = Arc::new(InMemoryCatalog::new(items));
    let clock = Arc::new(ManualClock::new(Timestamp::new(1_000)));
    let cache = Arc::new(IndexCache::new(ttl, clock.clone()).expect("valid ttl"));
    let resolver = NavigationResolver::new(catalog.clone(), cache.clone());
    Harness {
        catalog,
        clock,
        cache,
        resolver,
    }
}

/// Write items to a temporary JSON catalog file.
pub fn write_catalog(items: &[CatalogItem]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    let json = serde_json::to_string(items).expect("Failed to serialize catalog");
    file.write_all(json.as_bytes())
        .expect("Failed to write catalog");
    file
}

/// Create a configuration file pointing at a catalog.
pub fn create_config(catalog_path: &str, excluded: &[u64], ttl_seconds: u64) -> NamedTempFile {
    let excluded = excluded
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let config_content = format!(
        r#"
[catalog]
path = "{}"

[navigation]
excluded_category_ids = [{}]
cache_ttl_seconds = {}
"#,
        catalog_path, excluded, ttl_seconds
    );

    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(config_content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Load a config from a temp file.
pub fn load_config(file: &NamedTempFile) -> Config {
    Config::from_file(file.path()).expect("Failed to load config")
}
