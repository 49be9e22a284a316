use chrono::{DateTime, Utc};
use tokio::time::Instant;

use super::category::Category;

/// Composite key of a cached value: the resource category plus the scope it
/// belongs to (a guild ID, or a session credential for `Category::Session`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub category: Category,
    pub scope: String,
}

impl CacheKey {
    pub fn new(category: Category, scope: impl Into<String>) -> Self {
        Self {
            category,
            scope: scope.into(),
        }
    }

    /// Key for a guild-scoped resource.
    pub fn guild(category: Category, guild_id: u64) -> Self {
        Self::new(category, guild_id.to_string())
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.category, self.scope)
    }
}

/// A stored value with the time it was written.
///
/// Entries are never mutated in place; a write replaces the previous entry for its
/// key wholesale. Age is measured from the monotonic `inserted_at`, while
/// `stored_at` is the wall-clock time reported to callers.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: DateTime<Utc>,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Utc::now(),
            inserted_at: Instant::now(),
        }
    }

    pub fn age(&self) -> std::time::Duration {
        Instant::now().saturating_duration_since(self.inserted_at)
    }
}
