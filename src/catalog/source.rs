//! Catalog sources.
//!
//! A [`CatalogSource`] answers one question: which items currently match a
//! [`CatalogQuery`]. Sources may push the category filter down into their
//! backend, but the index builder re-applies every filter itself, so a source
//! that ignores the exclusion hint is still correct.

use crate::catalog::builder::ExclusionSet;
use crate::catalog::model::{CatalogItem, ItemId, ItemStatus};
use crate::core::error::{NavError, NavResult};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::SystemTime;

/// Query issued by the index builder.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    /// Required lifecycle status.
    pub status: ItemStatus,
    /// Categories whose members should be left out.
    pub exclude_categories: ExclusionSet,
}

impl CatalogQuery {
    /// All published items not in any of the given categories.
    pub fn published_excluding(exclusions: &ExclusionSet) -> Self {
        Self {
            status: ItemStatus::Published,
            exclude_categories: exclusions.clone(),
        }
    }

    /// Check if an item satisfies this query.
    ///
    /// Items without category data are never excluded.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        item.status == self.status && !self.exclude_categories.excludes(item)
    }
}

/// A queryable catalog backend.
pub trait CatalogSource: Send + Sync {
    /// Fetch the items matching the query, in any order.
    ///
    /// An unreachable backend must fail with `CatalogUnavailable` rather than
    /// answer with an empty list.
    fn query(&self, query: &CatalogQuery) -> NavResult<Vec<CatalogItem>>;
}

// ============================================================================
// In-memory source
// ============================================================================

/// Catalog held in process memory.
///
/// Counts queries and can be switched into an unavailable state, which makes
/// it the usual backend for embedding hosts and tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<Vec<CatalogItem>>,
    queries: AtomicU64,
    unavailable: AtomicBool,
}

impl InMemoryCatalog {
    /// Create a catalog with the given items.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: RwLock::new(items),
            queries: AtomicU64::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Insert an item, replacing any item with the same id.
    pub fn upsert(&self, item: CatalogItem) {
        let mut items = self.items.write();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

    /// Remove an item. Returns whether it was present.
    pub fn remove(&self, id: ItemId) -> bool {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }

    /// Make subsequent queries fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    /// Number of queries served or failed so far.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Acquire)
    }

    /// Number of items held, regardless of status.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Check if the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl CatalogSource for InMemoryCatalog {
    fn query(&self, query: &CatalogQuery) -> NavResult<Vec<CatalogItem>> {
        self.queries.fetch_add(1, Ordering::AcqRel);
        if self.unavailable.load(Ordering::Acquire) {
            return Err(NavError::catalog_unavailable("in-memory catalog offline"));
        }
        Ok(self
            .items
            .read()
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect())
    }
}

// ============================================================================
// File source
// ============================================================================

/// Catalog read from a JSON file on every query.
///
/// The file holds a JSON array of [`CatalogItem`] objects.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

/// Modification stamp of a catalog file, used for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    /// Last modification time, if the platform reports one.
    pub modified: Option<SystemTime>,
    /// File length in bytes.
    pub len: u64,
}

impl FileCatalog {
    /// Create a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every item in the file, regardless of status.
    pub fn load_all(&self) -> NavResult<Vec<CatalogItem>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            NavError::catalog_unavailable(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            NavError::catalog_unavailable(format!(
                "failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Current modification stamp of the file.
    pub fn stamp(&self) -> NavResult<FileStamp> {
        let metadata = std::fs::metadata(&self.path).map_err(|e| {
            NavError::catalog_unavailable(format!("failed to stat {}: {}", self.path.display(), e))
        })?;
        Ok(FileStamp {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

impl CatalogSource for FileCatalog {
    fn query(&self, query: &CatalogQuery) -> NavResult<Vec<CatalogItem>> {
        let items = self.load_all()?;
        tracing::trace!(path = %self.path.display(), items = items.len(), "catalog file loaded");
        Ok(items.into_iter().filter(|item| query.matches(item)).collect())
    }
}
