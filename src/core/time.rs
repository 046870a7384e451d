//! Time sources for cache expiry.
//!
//! Cache freshness is evaluated against a [`Clock`] rather than sampling
//! wall-clock time directly, so that expiry can be driven deterministically
//! in tests with a [`ManualClock`].

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// A point in time, in milliseconds since an epoch chosen by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Milliseconds since the clock's epoch.
    pub ms: u64,
}

impl Timestamp {
    /// Create a timestamp with the given millisecond value.
    pub const fn new(ms: u64) -> Self {
        Self { ms }
    }

    /// The clock epoch.
    pub const fn zero() -> Self {
        Self { ms: 0 }
    }

    /// Add a duration, saturating at `u64::MAX` milliseconds.
    pub fn saturating_add(self, duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self {
            ms: self.ms.saturating_add(ms),
        }
    }

    /// Check if this timestamp is at or after the given deadline.
    pub const fn is_at_or_after(self, deadline: Timestamp) -> bool {
        self.ms >= deadline.ms
    }

    /// Milliseconds until a deadline.
    ///
    /// Returns 0 if the deadline has already passed.
    pub fn ms_until(self, deadline: Timestamp) -> u64 {
        deadline.ms.saturating_sub(self.ms)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.ms)
    }
}

/// Source of the current time for cache expiry decisions.
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Timestamp::new(ms)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    /// Create a manual clock starting at the given timestamp.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now_ms: AtomicU64::new(start.ms),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.now_ms.fetch_add(ms, Ordering::AcqRel);
    }

    /// Set the clock to an absolute timestamp.
    pub fn set(&self, to: Timestamp) {
        self.now_ms.store(to.ms, Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.now_ms.load(Ordering::Acquire))
    }
}
