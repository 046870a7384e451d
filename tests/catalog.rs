//! Catalog and index builder tests.

mod common;

use common::*;
use loopnav::catalog::builder::{ExclusionSet, IndexBuilder, CACHE_KEY_PREFIX};
use loopnav::catalog::model::{CatalogItem, CategoryId, ItemId, ItemStatus};
use loopnav::catalog::source::{CatalogQuery, CatalogSource, FileCatalog, InMemoryCatalog};
use loopnav::core::error::{NavError, NavResult};
use std::sync::Arc;

fn exclude(ids: &[u64]) -> ExclusionSet {
    ids.iter().copied().map(CategoryId).collect()
}

fn build(items: Vec<CatalogItem>, exclusions: &ExclusionSet) -> Vec<ItemId> {
    let builder = IndexBuilder::new(Arc::new(InMemoryCatalog::new(items)));
    builder.build(exclusions).unwrap().as_slice().to_vec()
}

/// A source that ignores the query entirely.
struct UnfilteredSource(Vec<CatalogItem>);

impl CatalogSource for UnfilteredSource {
    fn query(&self, _query: &CatalogQuery) -> NavResult<Vec<CatalogItem>> {
        Ok(self.0.clone())
    }
}

// ============================================================================
// Exclusion sets
// ============================================================================

#[test]
fn empty_exclusion_set_excludes_nothing() {
    let set = ExclusionSet::empty();
    assert!(set.is_empty());
    assert!(!set.excludes(&CatalogItem::new(1, 0, "a").in_category(5)));
}

#[test]
fn uncategorized_items_are_never_excluded() {
    let set = exclude(&[5, 6]);
    assert!(!set.excludes(&CatalogItem::new(1, 0, "a")));
    assert!(set.excludes(&CatalogItem::new(2, 0, "b").in_category(1).in_category(6)));
}

#[test]
fn fingerprint_ignores_configuration_order() {
    assert_eq!(exclude(&[12, 34, 56]).fingerprint(), exclude(&[56, 12, 34, 12]).fingerprint());
    assert_ne!(exclude(&[12]).fingerprint(), exclude(&[13]).fingerprint());
    assert_ne!(exclude(&[]).fingerprint(), exclude(&[0]).fingerprint());
}

#[test]
fn cache_key_is_prefixed_hex_fingerprint() {
    let set = exclude(&[10000]);
    let key = set.cache_key();
    assert!(key.starts_with(CACHE_KEY_PREFIX));
    assert_eq!(key.len(), CACHE_KEY_PREFIX.len() + 16);
    assert_eq!(key, format!("{}{:016x}", CACHE_KEY_PREFIX, set.fingerprint()));
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn reference_catalog_builds_expected_index() {
    assert_eq!(build(reference_items(), &exclude(&[X])), vec![A, C, D]);
}

#[test]
fn sorts_by_menu_order_then_title_then_id() {
    let items = vec![
        CatalogItem::new(10, 2, "Alpha"),
        CatalogItem::new(11, 1, "Zulu"),
        CatalogItem::new(12, 1, "Bravo"),
        CatalogItem::new(14, 1, "Bravo"),
        CatalogItem::new(13, 1, "Bravo"),
        CatalogItem::new(15, -3, "Omega"),
    ];
    assert_eq!(
        build(items, &ExclusionSet::empty()),
        vec![ItemId(15), ItemId(12), ItemId(13), ItemId(14), ItemId(11), ItemId(10)]
    );
}

#[test]
fn unpublished_items_are_left_out() {
    let items = vec![
        CatalogItem::new(1, 0, "a"),
        CatalogItem::new(2, 0, "b").with_status(ItemStatus::Draft),
        CatalogItem::new(3, 0, "c").with_status(ItemStatus::Trash),
        CatalogItem::new(4, 0, "d").with_status(ItemStatus::Private),
    ];
    assert_eq!(build(items, &ExclusionSet::empty()), vec![ItemId(1)]);
}

#[test]
fn builder_refilters_when_source_ignores_query() {
    let source = UnfilteredSource(vec![
        CatalogItem::new(1, 0, "a"),
        CatalogItem::new(2, 0, "b").in_category(7),
        CatalogItem::new(3, 0, "c").with_status(ItemStatus::Pending),
        CatalogItem::new(4, 0, "d"),
    ]);
    let index = IndexBuilder::new(Arc::new(source)).build(&exclude(&[7])).unwrap();
    assert_eq!(index.as_slice(), &[ItemId(1), ItemId(4)]);
}

#[test]
fn duplicate_ids_keep_first_sorted_occurrence() {
    let source = UnfilteredSource(vec![
        CatalogItem::new(1, 5, "late"),
        CatalogItem::new(2, 3, "mid"),
        CatalogItem::new(1, 1, "early"),
    ]);
    let index = IndexBuilder::new(Arc::new(source))
        .build(&ExclusionSet::empty())
        .unwrap();
    assert_eq!(index.as_slice(), &[ItemId(1), ItemId(2)]);
}

#[test]
fn empty_catalog_is_not_an_error() {
    assert!(build(Vec::new(), &exclude(&[1])).is_empty());
}

#[test]
fn unavailable_source_fails_instead_of_returning_empty() {
    let catalog = Arc::new(InMemoryCatalog::new(reference_items()));
    catalog.set_unavailable(true);
    let err = IndexBuilder::new(catalog).build(&ExclusionSet::empty()).unwrap_err();
    assert!(matches!(err, NavError::CatalogUnavailable { .. }));
    assert!(err.is_catalog_failure());
}

#[test]
fn builder_does_not_mutate_catalog() {
    let catalog = Arc::new(InMemoryCatalog::new(reference_items()));
    IndexBuilder::new(catalog.clone()).build(&exclude(&[X])).unwrap();
    assert_eq!(catalog.len(), 4);
}

// ============================================================================
// Sources
// ============================================================================

#[test]
fn in_memory_catalog_upsert_and_remove() {
    let catalog = InMemoryCatalog::new(reference_items());
    catalog.upsert(CatalogItem::new(A.0, 9, "A moved"));
    catalog.upsert(CatalogItem::new(5, 0, "E"));
    assert_eq!(catalog.len(), 5);
    assert!(catalog.remove(B));
    assert!(!catalog.remove(B));

    let query = CatalogQuery::published_excluding(&ExclusionSet::empty());
    let items = catalog.query(&query).unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(catalog.query_count(), 1);
}

#[test]
fn file_catalog_reads_json() {
    let file = write_catalog(&reference_items());
    let builder = IndexBuilder::new(Arc::new(FileCatalog::new(file.path())));
    let index = builder.build(&exclude(&[X])).unwrap();
    assert_eq!(index.as_slice(), &[A, C, D]);
}

#[test]
fn file_catalog_accepts_host_field_conventions() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut file,
        br#"[
            {"id": 7, "title": "Hat", "status": "publish", "categories": [12]},
            {"id": 8, "title": "Cap", "status": "publish"},
            {"id": 9, "title": "Scarf", "menu_order": -1, "status": "draft"}
        ]"#,
    )
    .unwrap();

    let items = FileCatalog::new(file.path()).load_all().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].categories, vec![CategoryId(12)]);
    assert!(items[1].categories.is_empty());
    assert_eq!(items[1].menu_order, 0);
    assert_eq!(items[2].status, ItemStatus::Draft);
}

#[test]
fn missing_file_is_catalog_unavailable() {
    let catalog = FileCatalog::new("/nonexistent/loopnav/catalog.json");
    let query = CatalogQuery::published_excluding(&ExclusionSet::empty());
    assert!(matches!(
        catalog.query(&query),
        Err(NavError::CatalogUnavailable { .. })
    ));
}

#[test]
fn malformed_file_is_catalog_unavailable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"{ not json").unwrap();
    let err = FileCatalog::new(file.path()).load_all().unwrap_err();
    assert!(err.to_string().contains("failed to parse"));
}

#[test]
fn unrecognized_host_status_is_not_navigable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut file,
        br#"[
            {"id": 1, "title": "A", "menu_order": 1, "status": "publish"},
            {"id": 5, "title": "E", "menu_order": 2, "status": "future"},
            {"id": 6, "title": "F", "menu_order": 3, "status": "auto-draft"},
            {"id": 2, "title": "B", "menu_order": 4, "status": "publish"}
        ]"#,
    )
    .unwrap();

    let catalog = FileCatalog::new(file.path());
    let items = catalog.load_all().unwrap();
    assert_eq!(items[1].status, ItemStatus::Other);
    assert!(!items[1].status.is_published());

    let builder = IndexBuilder::new(Arc::new(catalog));
    let index = builder.build(&ExclusionSet::empty()).unwrap();
    assert_eq!(index.as_slice(), &[A, B]);
}
