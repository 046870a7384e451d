//! Catalog mutation events.
//!
//! The host publishes a [`CatalogEvent`] whenever an item or category
//! changes. Every event invalidates the whole index cache; no attempt is made
//! to work out whether the change actually affects navigation.

use crate::catalog::model::{CategoryId, ItemId};
use crate::catalog::source::{FileCatalog, FileStamp};
use crate::nav::resolver::NavigationResolver;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A change to catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "id", rename_all = "snake_case")]
pub enum CatalogEvent {
    ItemCreated(ItemId),
    ItemUpdated(ItemId),
    ItemDeleted(ItemId),
    CategoryCreated(CategoryId),
    CategoryUpdated(CategoryId),
    CategoryDeleted(CategoryId),
    /// The catalog changed in a way that cannot be attributed to one record.
    SourceChanged,
}

impl std::fmt::Display for CatalogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemCreated(id) => write!(f, "item {} created", id),
            Self::ItemUpdated(id) => write!(f, "item {} updated", id),
            Self::ItemDeleted(id) => write!(f, "item {} deleted", id),
            Self::CategoryCreated(id) => write!(f, "category {} created", id),
            Self::CategoryUpdated(id) => write!(f, "category {} updated", id),
            Self::CategoryDeleted(id) => write!(f, "category {} deleted", id),
            Self::SourceChanged => write!(f, "catalog source changed"),
        }
    }
}

/// Type alias for event subscriber callbacks.
type EventSubscriber = Box<dyn Fn(&CatalogEvent) + Send + Sync>;

/// Fan-out of catalog events to subscribers.
#[derive(Default)]
pub struct CatalogEvents {
    subscribers: RwLock<Vec<EventSubscriber>>,
}

impl CatalogEvents {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to catalog events.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&CatalogEvent) + Send + Sync + 'static,
    {
        self.subscribers.write().push(Box::new(callback));
    }

    /// Deliver an event to every subscriber, in subscription order.
    pub fn publish(&self, event: CatalogEvent) {
        let subscribers = self.subscribers.read();
        tracing::debug!(%event, subscribers = subscribers.len(), "catalog event");
        for subscriber in subscribers.iter() {
            subscriber(&event);
        }
    }

    /// Number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl std::fmt::Debug for CatalogEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEvents")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl NavigationResolver {
    /// React to a catalog event.
    pub fn handle_event(&self, event: &CatalogEvent) {
        tracing::info!(%event, "invalidating navigation index");
        self.invalidate();
    }

    /// Invalidate this resolver's cache on every event published on `events`.
    pub fn attach(&self, events: &CatalogEvents) {
        let resolver = self.clone();
        events.subscribe(move |event| resolver.handle_event(event));
    }
}

/// Turns changes to a catalog file into [`CatalogEvent::SourceChanged`].
///
/// The file's stamp (modification time and length) is compared on every
/// [`poll`](Self::poll). A file that disappears or reappears also counts as
/// a change.
#[derive(Debug)]
pub struct CatalogFileWatch {
    catalog: Arc<FileCatalog>,
    last: Option<FileStamp>,
}

impl CatalogFileWatch {
    /// Start watching, taking the file's current stamp as the baseline.
    pub fn new(catalog: Arc<FileCatalog>) -> Self {
        let last = catalog.stamp().ok();
        Self { catalog, last }
    }

    /// Compare the file against the last stamp seen. Publishes
    /// `SourceChanged` and returns true if it changed.
    pub fn poll(&mut self, events: &CatalogEvents) -> bool {
        let stamp = self.catalog.stamp().ok();
        if stamp == self.last {
            return false;
        }
        tracing::debug!(
            path = %self.catalog.path().display(),
            present = stamp.is_some(),
            "catalog file changed"
        );
        self.last = stamp;
        events.publish(CatalogEvent::SourceChanged);
        true
    }
}
