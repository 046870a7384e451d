//! Ordered index construction.
//!
//! The builder turns a catalog query result into an [`OrderedIndex`]: the
//! ids of all published items outside the excluded categories, sorted by
//! `(menu_order, title, id)`.

use crate::catalog::model::{CatalogItem, CategoryId, ItemId};
use crate::catalog::source::{CatalogQuery, CatalogSource};
use crate::core::error::NavResult;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::hash::Hasher;
use std::sync::Arc;
use twox_hash::XxHash64;

/// Seed for exclusion set fingerprints. Changing it orphans every cache key.
const FINGERPRINT_SEED: u64 = 0x6c6f_6f70_6e61_7601;

/// Prefix of cache keys derived from an exclusion set.
pub const CACHE_KEY_PREFIX: &str = "loopnav_index_";

/// Immutable set of excluded categories.
///
/// An empty set excludes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExclusionSet {
    categories: BTreeSet<CategoryId>,
}

impl ExclusionSet {
    /// The set that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if a category is excluded.
    pub fn contains(&self, category: CategoryId) -> bool {
        self.categories.contains(&category)
    }

    /// Check if an item belongs to any excluded category.
    ///
    /// Items with no categories are never excluded.
    pub fn excludes(&self, item: &CatalogItem) -> bool {
        !self.categories.is_empty()
            && item
                .categories
                .iter()
                .any(|category| self.categories.contains(category))
    }

    /// Number of excluded categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Excluded categories in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.categories.iter().copied()
    }

    /// Stable 64-bit fingerprint of the set.
    ///
    /// Independent of the order ids were configured in.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(FINGERPRINT_SEED);
        for category in &self.categories {
            hasher.write(&category.0.to_le_bytes());
        }
        hasher.finish()
    }

    /// Cache key for indexes built with this exclusion set.
    pub fn cache_key(&self) -> String {
        format!("{}{:016x}", CACHE_KEY_PREFIX, self.fingerprint())
    }
}

impl FromIterator<CategoryId> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = CategoryId>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

/// The filtered, sorted sequence of navigable item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedIndex {
    ids: Vec<ItemId>,
}

impl OrderedIndex {
    /// Create an index from ids already in navigation order.
    ///
    /// Repeated ids keep their first position.
    pub fn from_ids(ids: impl IntoIterator<Item = ItemId>) -> Self {
        let mut seen = HashSet::new();
        Self {
            ids: ids.into_iter().filter(|id| seen.insert(*id)).collect(),
        }
    }

    /// Position of an item, by exact id equality.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    /// Check if an item is navigable.
    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    /// Item at a position.
    pub fn get(&self, pos: usize) -> Option<ItemId> {
        self.ids.get(pos).copied()
    }

    /// Number of navigable items.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if no item is navigable.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The ids in navigation order.
    pub fn as_slice(&self) -> &[ItemId] {
        &self.ids
    }

    /// Iterate ids in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.ids.iter().copied()
    }
}

/// Builds ordered indexes from a catalog source.
#[derive(Clone)]
pub struct IndexBuilder {
    source: Arc<dyn CatalogSource>,
}

impl IndexBuilder {
    /// Create a builder over a catalog source.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Query, filter and sort the catalog.
    ///
    /// Fails only when the source fails. Status and exclusion filters are
    /// re-applied here whatever the source did with the query.
    pub fn build(&self, exclusions: &ExclusionSet) -> NavResult<OrderedIndex> {
        let query = CatalogQuery::published_excluding(exclusions);
        let items = self.source.query(&query)?;
        let queried = items.len();

        let mut retained: Vec<CatalogItem> = items
            .into_iter()
            .filter(|item| item.status.is_published() && !exclusions.excludes(item))
            .collect();
        let filtered_out = queried - retained.len();

        retained.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut seen = HashSet::with_capacity(retained.len());
        let mut ids = Vec::with_capacity(retained.len());
        for item in &retained {
            if seen.insert(item.id) {
                ids.push(item.id);
            } else {
                tracing::warn!(
                    item_id = %item.id,
                    "catalog returned duplicate item; keeping first"
                );
            }
        }

        tracing::debug!(
            queried,
            filtered_out,
            retained = ids.len(),
            exclusions = exclusions.len(),
            "built ordered index"
        );

        Ok(OrderedIndex { ids })
    }
}

impl std::fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuilder").finish_non_exhaustive()
    }
}
