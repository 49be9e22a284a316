//! Cache-first aggregation of guild resources.
//!
//! The aggregator answers "give me these categories for this guild" from the
//! resource store where possible, fans out one fetch per missing category, and
//! falls back to expired entries when a fetch fails. Categories are resolved
//! independently: a slow or failing member list never affects channels or roles
//! requested in the same call.

use chrono::{DateTime, Utc};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};
use tokio::task::JoinSet;

use crate::{
    cache::{CacheKey, CachedValue, Category, ReadMode, TtlStore},
    model::resource::{CategoryResultDto, ResourcePayload},
    server::{error::fetch::FetchError, service::discord::ResourceFetcher},
};

/// Outcome of resolving a single category.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Cache hit or successful fetch.
    Fresh(ResourcePayload),
    /// The fetch failed and an expired entry was served instead.
    Stale {
        payload: ResourcePayload,
        stored_at: DateTime<Utc>,
        /// The failure that triggered the fallback.
        cause: FetchError,
    },
    /// The fetch failed and no usable cached entry existed.
    Failed(FetchError),
}

impl Resolution {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Resolution::Fresh(_))
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Resolution::Stale { .. })
    }

    pub fn into_dto(self) -> CategoryResultDto {
        match self {
            Resolution::Fresh(payload) => CategoryResultDto::Fresh { payload },
            Resolution::Stale {
                payload, stored_at, ..
            } => CategoryResultDto::Stale { payload, stored_at },
            Resolution::Failed(err) => err.into_dto(),
        }
    }
}

pub struct Aggregator {
    store: Arc<TtlStore<ResourcePayload>>,
    fetchers: HashMap<Category, Arc<dyn ResourceFetcher>>,
}

impl Aggregator {
    /// Creates an aggregator over `store` using one fetcher per category.
    ///
    /// A later fetcher for the same category replaces an earlier one.
    pub fn new(
        store: Arc<TtlStore<ResourcePayload>>,
        fetchers: impl IntoIterator<Item = Arc<dyn ResourceFetcher>>,
    ) -> Self {
        let fetchers = fetchers
            .into_iter()
            .map(|fetcher| (fetcher.category(), fetcher))
            .collect();

        Self { store, fetchers }
    }

    pub fn store(&self) -> &Arc<TtlStore<ResourcePayload>> {
        &self.store
    }

    /// Resolves every requested category for `guild_id`.
    ///
    /// Fresh cache hits are returned directly. Every miss is fetched concurrently,
    /// and this call only returns once each launched fetch has finished. Successful
    /// fetches are written back to the store; failed fetches are replaced by the
    /// expired entry read before the fetch when the failure permits it.
    ///
    /// The returned map holds exactly the requested categories that have a fetcher.
    /// Requests for categories without one are logged and skipped.
    pub async fn resolve(
        &self,
        guild_id: u64,
        categories: &BTreeSet<Category>,
    ) -> BTreeMap<Category, Resolution> {
        let mut resolved = BTreeMap::new();
        let mut fetches = JoinSet::new();
        let mut launched = BTreeSet::new();
        let mut fallbacks = HashMap::new();

        for &category in categories {
            let Some(fetcher) = self.fetchers.get(&category) else {
                tracing::warn!("No fetcher registered for category {}", category);
                continue;
            };

            let key = CacheKey::guild(category, guild_id);
            match self.store.get(&key, ReadMode::AllowStale) {
                Some(cached) if !cached.expired => {
                    tracing::debug!("Cache hit for {}", key);
                    resolved.insert(category, Resolution::Fresh(cached.value));
                    continue;
                }
                Some(cached) => {
                    tracing::debug!("Cache entry for {} expired, refreshing", key);
                    fallbacks.insert(category, cached);
                }
                None => tracing::debug!("Cache miss for {}, fetching", key),
            }

            let fetcher = Arc::clone(fetcher);
            launched.insert(category);
            fetches.spawn(async move { (category, fetcher.fetch(guild_id).await) });
        }

        while let Some(joined) = fetches.join_next().await {
            match joined {
                Ok((category, result)) => {
                    launched.remove(&category);
                    let fallback = fallbacks.remove(&category);
                    let resolution = self.settle(guild_id, category, result, fallback);
                    resolved.insert(category, resolution);
                }
                Err(e) => tracing::error!("Fetch task for guild {} failed: {}", guild_id, e),
            }
        }

        // Only a panicked fetch task leaves its category here.
        for category in launched {
            let failure = FetchError::Transport("fetch task aborted".to_string());
            let fallback = fallbacks.remove(&category);
            let resolution = self.settle(guild_id, category, Err(failure), fallback);
            resolved.insert(category, resolution);
        }

        resolved
    }

    /// Resolves a single category.
    pub async fn resolve_one(&self, guild_id: u64, category: Category) -> Option<Resolution> {
        let categories = BTreeSet::from([category]);
        self.resolve(guild_id, &categories).await.remove(&category)
    }

    /// Drops the cached entry for one category of a guild, forcing the next
    /// resolve to go upstream.
    pub fn invalidate(&self, category: Category, guild_id: u64) {
        if self.store.invalidate(&CacheKey::guild(category, guild_id)) {
            tracing::info!("Invalidated {} for guild {}", category, guild_id);
        }
    }

    /// Drops every cached category of a guild.
    pub fn invalidate_guild(&self, guild_id: u64) -> usize {
        let removed = self.store.invalidate_scope(&guild_id.to_string());
        tracing::info!("Invalidated {} cached entries for guild {}", removed, guild_id);
        removed
    }

    /// Turns one fetch result into a resolution.
    ///
    /// # Arguments
    /// - `fallback` - Expired entry read before the fetch was launched, if any
    fn settle(
        &self,
        guild_id: u64,
        category: Category,
        result: Result<ResourcePayload, FetchError>,
        fallback: Option<CachedValue<ResourcePayload>>,
    ) -> Resolution {
        let key = CacheKey::guild(category, guild_id);

        let err = match result {
            Ok(payload) => {
                self.store.set(key, payload.clone());
                return Resolution::Fresh(payload);
            }
            Err(err) => err,
        };

        // A concurrent resolve refreshed the entry while this fetch was failing.
        if let Some(cached) = self.store.get(&key, ReadMode::AllowStale) {
            if !cached.expired {
                return Resolution::Fresh(cached.value);
            }
        }

        if !err.allows_stale() {
            tracing::debug!("Fetch for {} failed without fallback: {}", key, err);
            return Resolution::Failed(err);
        }

        match fallback {
            Some(cached) => {
                tracing::warn!(
                    "Fetch for {} failed ({}), serving entry stored at {}",
                    key,
                    err,
                    cached.stored_at
                );
                Resolution::Stale {
                    payload: cached.value,
                    stored_at: cached.stored_at,
                    cause: err,
                }
            }
            None => {
                tracing::debug!("Fetch for {} failed with no cached fallback: {}", key, err);
                Resolution::Failed(err)
            }
        }
    }
}
