//! Catalog item model.

use serde::{Deserialize, Serialize};

/// Stable item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Publicly visible; the only navigable status.
    #[serde(alias = "publish")]
    Published,
    Draft,
    Pending,
    Private,
    Trash,
    /// Any other host status (`future`, `auto-draft`, `inherit`, ...).
    #[serde(other)]
    Other,
}

impl ItemStatus {
    /// Check if items with this status take part in navigation.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// A catalog item as seen by the index builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item identifier.
    pub id: ItemId,
    /// Display title, second sort key.
    pub title: String,
    /// Explicit position, first sort key.
    #[serde(default)]
    pub menu_order: i64,
    /// Lifecycle status.
    pub status: ItemStatus,
    /// Categories the item belongs to. Empty when unclassified.
    #[serde(default)]
    pub categories: Vec<CategoryId>,
}

impl CatalogItem {
    /// Create a published, uncategorized item.
    pub fn new(id: u64, menu_order: i64, title: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            menu_order,
            status: ItemStatus::Published,
            categories: Vec::new(),
        }
    }

    /// Builder-style: add the item to a category.
    pub fn in_category(mut self, category: u64) -> Self {
        self.categories.push(CategoryId(category));
        self
    }

    /// Builder-style: set the lifecycle status.
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// The full ordering key: `(menu_order, title, id)`.
    pub fn sort_key(&self) -> (i64, &str, ItemId) {
        (self.menu_order, self.title.as_str(), self.id)
    }
}
