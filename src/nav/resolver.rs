//! Circular previous/next resolution.
//!
//! Given the current item and an exclusion set, the resolver fetches the
//! ordered index through the cache and returns the item before and after the
//! current one, wrapping around at both ends.

use crate::catalog::builder::{ExclusionSet, IndexBuilder, OrderedIndex};
use crate::catalog::model::ItemId;
use crate::catalog::source::CatalogSource;
use crate::core::config::NavigationConfig;
use crate::core::error::NavResult;
use crate::nav::cache::{CacheState, CacheStats, IndexCache, Lookup};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Previous and next items for the current item.
///
/// An absent side means "omit that control", not a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub prev: Option<ItemId>,
    pub next: Option<ItemId>,
}

impl Neighbors {
    /// No neighbors.
    pub const NONE: Neighbors = Neighbors {
        prev: None,
        next: None,
    };

    /// Check if neither neighbor is present.
    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

/// Why navigation did or did not produce neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavOutcome {
    /// Both neighbors found. They are equal when the index holds two items.
    Resolved { prev: ItemId, next: ItemId },
    /// The host supplied no current item; the catalog was not queried.
    NoCurrentItem,
    /// No item is navigable.
    EmptyIndex,
    /// The current item is not in the index (excluded, unpublished or unknown).
    NotNavigable,
    /// The current item is the only navigable item.
    SingleItem,
}

impl NavOutcome {
    /// Locate `current` in `index` and compute its circular neighbors.
    pub fn for_index(index: &OrderedIndex, current: ItemId) -> Self {
        if index.is_empty() {
            return Self::EmptyIndex;
        }
        let Some(pos) = index.position(current) else {
            return Self::NotNavigable;
        };
        match circular_positions(index.len(), pos)
            .and_then(|(prev, next)| Some((index.get(prev)?, index.get(next)?)))
        {
            Some((prev, next)) => Self::Resolved { prev, next },
            None => Self::SingleItem,
        }
    }

    /// The neighbor pair; empty unless resolved.
    pub fn neighbors(&self) -> Neighbors {
        match *self {
            Self::Resolved { prev, next } => Neighbors {
                prev: Some(prev),
                next: Some(next),
            },
            _ => Neighbors::NONE,
        }
    }

    /// Check if neighbors were found.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Predecessor and successor positions of `pos` in a ring of `len` items.
///
/// Returns `None` when `len < 2` or `pos` is out of range.
pub fn circular_positions(len: usize, pos: usize) -> Option<(usize, usize)> {
    if len < 2 || pos >= len {
        return None;
    }
    let prev = if pos == 0 { len - 1 } else { pos - 1 };
    let next = if pos == len - 1 { 0 } else { pos + 1 };
    Some((prev, next))
}

/// Resolves neighbors through a shared index cache.
#[derive(Debug, Clone)]
pub struct NavigationResolver {
    builder: IndexBuilder,
    cache: Arc<IndexCache>,
}

impl NavigationResolver {
    /// Create a resolver over a catalog source and a cache.
    pub fn new(source: Arc<dyn CatalogSource>, cache: Arc<IndexCache>) -> Self {
        Self {
            builder: IndexBuilder::new(source),
            cache,
        }
    }

    /// Create a resolver with a wall-clock cache using the configured TTL.
    pub fn from_config(
        config: &NavigationConfig,
        source: Arc<dyn CatalogSource>,
    ) -> NavResult<Self> {
        let cache = IndexCache::with_system_clock(config.cache_ttl())?;
        Ok(Self::new(source, Arc::new(cache)))
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<IndexCache> {
        &self.cache
    }

    /// Get the ordered index, rebuilding it if absent or stale.
    ///
    /// A failed rebuild is returned as is and leaves the cache untouched.
    pub fn get_ordered_index(&self, exclusions: &ExclusionSet) -> NavResult<Arc<OrderedIndex>> {
        match self.cache.lookup(exclusions) {
            Lookup::Hit(index) => Ok(index),
            Lookup::Miss(ticket) => {
                let index = self.builder.build(exclusions).map_err(|e| {
                    tracing::warn!(
                        error = %e,
                        cache_key = %exclusions.cache_key(),
                        "index rebuild failed"
                    );
                    e
                })?;
                Ok(self.cache.publish(ticket, index))
            }
        }
    }

    /// Discard all cached indexes.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Compute the navigation outcome for the current item.
    ///
    /// When `current` is `None` the catalog is not queried.
    pub fn navigate(
        &self,
        current: Option<ItemId>,
        exclusions: &ExclusionSet,
    ) -> NavResult<NavOutcome> {
        let Some(current) = current else {
            return Ok(NavOutcome::NoCurrentItem);
        };
        let index = self.get_ordered_index(exclusions)?;
        let outcome = NavOutcome::for_index(&index, current);
        tracing::debug!(item_id = %current, ?outcome, "navigation resolved");
        Ok(outcome)
    }

    /// Previous and next items for `current`.
    pub fn resolve_neighbors(
        &self,
        current: ItemId,
        exclusions: &ExclusionSet,
    ) -> NavResult<Neighbors> {
        self.navigate(Some(current), exclusions)
            .map(|outcome| outcome.neighbors())
    }

    /// Previous and next items for an optional current item.
    pub fn resolve_current(
        &self,
        current: Option<ItemId>,
        exclusions: &ExclusionSet,
    ) -> NavResult<Neighbors> {
        self.navigate(current, exclusions)
            .map(|outcome| outcome.neighbors())
    }

    /// Freshness of the cached index for an exclusion set.
    pub fn cache_state(&self, exclusions: &ExclusionSet) -> CacheState {
        self.cache.state(exclusions)
    }

    /// Cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(ids: &[u64]) -> OrderedIndex {
        OrderedIndex::from_ids(ids.iter().copied().map(ItemId))
    }

    #[test]
    fn circular_positions_wrap_both_ends() {
        assert_eq!(circular_positions(3, 0), Some((2, 1)));
        assert_eq!(circular_positions(3, 1), Some((0, 2)));
        assert_eq!(circular_positions(3, 2), Some((1, 0)));
    }

    #[test]
    fn circular_positions_two_items_point_at_each_other() {
        assert_eq!(circular_positions(2, 0), Some((1, 1)));
        assert_eq!(circular_positions(2, 1), Some((0, 0)));
    }

    #[test]
    fn circular_positions_degenerate() {
        assert_eq!(circular_positions(0, 0), None);
        assert_eq!(circular_positions(1, 0), None);
        assert_eq!(circular_positions(3, 3), None);
    }

    #[test]
    fn outcome_reasons() {
        assert_eq!(
            NavOutcome::for_index(&index(&[]), ItemId(1)),
            NavOutcome::EmptyIndex
        );
        assert_eq!(
            NavOutcome::for_index(&index(&[1]), ItemId(1)),
            NavOutcome::SingleItem
        );
        assert_eq!(
            NavOutcome::for_index(&index(&[1]), ItemId(2)),
            NavOutcome::NotNavigable
        );
        assert_eq!(
            NavOutcome::for_index(&index(&[1, 2, 3]), ItemId(3)),
            NavOutcome::Resolved {
                prev: ItemId(2),
                next: ItemId(1)
            }
        );
    }

    #[test]
    fn unresolved_outcomes_have_no_neighbors() {
        for outcome in [
            NavOutcome::NoCurrentItem,
            NavOutcome::EmptyIndex,
            NavOutcome::NotNavigable,
            NavOutcome::SingleItem,
        ] {
            assert!(outcome.neighbors().is_empty());
            assert!(!outcome.is_resolved());
        }
    }
}
