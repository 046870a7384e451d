//! Time-bounded cache of ordered indexes.
//!
//! One entry is kept per exclusion fingerprint. An entry is either fresh
//! (served as is) or stale (rebuilt before use); nothing in between is ever
//! served. Entries are replaced whole: a rebuilt index is fully materialized
//! before it is published into the map as a single `Arc`.
//!
//! # Concurrency
//!
//! Concurrent misses may each rebuild, and the last publish wins. Every
//! [`IndexCache::invalidate`] bumps a generation counter; a rebuild that
//! started under an older generation is handed back to its caller but never
//! published, so an invalidation cannot be undone by a rebuild that read the
//! catalog before the mutation.

use crate::catalog::builder::{ExclusionSet, OrderedIndex};
use crate::core::error::{NavError, NavResult};
use crate::core::time::{Clock, SystemClock, Timestamp};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Freshness of the cache entry for one exclusion set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheState {
    /// No entry; the next read rebuilds.
    Absent,
    /// Within TTL and not invalidated.
    Fresh,
    /// Past TTL; must be rebuilt before use.
    Stale,
}

impl CacheState {
    /// Check if an entry in this state may be served.
    pub fn is_servable(&self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// A built index and its expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached index.
    pub index: Arc<OrderedIndex>,
    /// Fingerprint of the exclusion set the index was built with.
    pub fingerprint: u64,
    /// When the index was published.
    pub built_at: Timestamp,
    /// When the index stops being servable.
    pub expires_at: Timestamp,
}

impl CacheEntry {
    /// State of this entry at the given time.
    pub fn state_at(&self, now: Timestamp) -> CacheState {
        if now.is_at_or_after(self.expires_at) {
            CacheState::Stale
        } else {
            CacheState::Fresh
        }
    }
}

/// Result of a cache read.
#[derive(Debug)]
pub enum Lookup {
    /// A fresh index.
    Hit(Arc<OrderedIndex>),
    /// No servable index; rebuild and hand the ticket back to [`IndexCache::publish`].
    Miss(RebuildTicket),
}

/// Permission to publish a rebuilt index, tied to the generation it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildTicket {
    fingerprint: u64,
    generation: u64,
}

/// Index cache keyed by exclusion fingerprint.
pub struct IndexCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<u64, Arc<CacheEntry>>>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    rebuilds: AtomicU64,
    discarded: AtomicU64,
    invalidations: AtomicU64,
}

impl IndexCache {
    /// Create a cache with the given TTL and clock.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> NavResult<Self> {
        if ttl.is_zero() {
            return Err(NavError::InvalidTtl);
        }
        Ok(Self {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            rebuilds: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        })
    }

    /// Create a cache driven by wall-clock time.
    pub fn with_system_clock(ttl: Duration) -> NavResult<Self> {
        Self::new(ttl, Arc::new(SystemClock))
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read the index for an exclusion set.
    pub fn lookup(&self, exclusions: &ExclusionSet) -> Lookup {
        let fingerprint = exclusions.fingerprint();
        let entries = self.entries.read();
        let generation = self.generation.load(Ordering::Acquire);
        let now = self.clock.now();

        match entries.get(&fingerprint) {
            Some(entry) if entry.state_at(now).is_servable() => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(fingerprint, "index cache hit");
                Lookup::Hit(Arc::clone(&entry.index))
            }
            entry => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(fingerprint, stale = entry.is_some(), "index cache miss");
                Lookup::Miss(RebuildTicket {
                    fingerprint,
                    generation,
                })
            }
        }
    }

    /// Publish a rebuilt index and return it as shared.
    ///
    /// The index is dropped from the cache (but still returned) if the cache
    /// was invalidated after the ticket was issued.
    pub fn publish(&self, ticket: RebuildTicket, index: OrderedIndex) -> Arc<OrderedIndex> {
        let index = Arc::new(index);
        let now = self.clock.now();
        let entry = Arc::new(CacheEntry {
            index: Arc::clone(&index),
            fingerprint: ticket.fingerprint,
            built_at: now,
            expires_at: now.saturating_add(self.ttl),
        });

        let mut entries = self.entries.write();
        if self.generation.load(Ordering::Acquire) == ticket.generation {
            entries.insert(ticket.fingerprint, entry);
            self.rebuilds.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                fingerprint = ticket.fingerprint,
                items = index.len(),
                expires_at = %now.saturating_add(self.ttl),
                "index cached"
            );
        } else {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                fingerprint = ticket.fingerprint,
                "cache invalidated during rebuild; index not cached"
            );
        }
        index
    }

    /// Discard every entry. Idempotent.
    pub fn invalidate(&self) {
        let mut entries = self.entries.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        let dropped = entries.len();
        entries.clear();
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        tracing::info!(dropped, "index cache invalidated");
    }

    /// Drop entries past their TTL. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.state_at(now).is_servable());
        before - entries.len()
    }

    /// Freshness of the entry for an exclusion set.
    pub fn state(&self, exclusions: &ExclusionSet) -> CacheState {
        let now = self.clock.now();
        self.entries
            .read()
            .get(&exclusions.fingerprint())
            .map_or(CacheState::Absent, |entry| entry.state_at(now))
    }

    /// Time left before the entry for an exclusion set goes stale.
    ///
    /// `None` when there is no entry; zero once it has expired.
    pub fn remaining(&self, exclusions: &ExclusionSet) -> Option<Duration> {
        let now = self.clock.now();
        self.entries
            .read()
            .get(&exclusions.fingerprint())
            .map(|entry| Duration::from_millis(now.ms_until(entry.expires_at)))
    }

    /// The current entry for an exclusion set, fresh or not.
    pub fn entry(&self, exclusions: &ExclusionSet) -> Option<Arc<CacheEntry>> {
        self.entries.read().get(&exclusions.fingerprint()).cloned()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.read().len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            rebuilds: self.rebuilds.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            generation: self.generation.load(Ordering::Acquire),
        }
    }
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries currently held, fresh or stale.
    pub entries: usize,
    /// Reads served from the cache.
    pub hits: u64,
    /// Reads that required a rebuild.
    pub misses: u64,
    /// Rebuilt indexes published into the cache.
    pub rebuilds: u64,
    /// Rebuilt indexes dropped because of a concurrent invalidation.
    pub discarded: u64,
    /// Calls to `invalidate`.
    pub invalidations: u64,
    /// Current invalidation generation.
    pub generation: u64,
}
