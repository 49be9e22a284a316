//! Caller-side cache of guild resources.
//!
//! Several dashboard views usually need the same guild's channels and roles within
//! seconds of each other. `ClientCache` keeps its own `TtlStore` so those views
//! share one round trip, and coalesces misses into as few bulk calls as possible:
//! channels and roles (plus the guild entity, when also missing) always travel in
//! one combined call, while members always get a call of their own because of
//! their payload size.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    cache::{CacheKey, Category, ReadMode, TtlPolicy, TtlStore},
    client::{api::GuildApi, model::error::ApiError},
    model::resource::{CategoryResultDto, GuildResourcesDto, ResourcePayload},
};

/// Categories that ride along in the combined call.
const COMBINED: [Category; 3] = [Category::Channels, Category::Roles, Category::Guild];

pub struct ClientCache<A> {
    api: A,
    store: TtlStore<ResourcePayload>,
}

impl<A: GuildApi> ClientCache<A> {
    pub fn new(api: A, policy: TtlPolicy) -> Self {
        Self {
            api,
            store: TtlStore::new("client", policy),
        }
    }

    /// Returns one category, from the local cache when fresh.
    pub async fn get(&self, guild_id: u64, category: Category) -> Result<ResourcePayload, ApiError> {
        let categories = BTreeSet::from([category]);
        self.get_many(guild_id, &categories)
            .await
            .remove(&category)
            .unwrap_or_else(|| Err(not_requestable(category)))
    }

    /// Returns every requested category, fetching only local misses.
    ///
    /// Misses are coalesced into at most two concurrent calls: one combined call
    /// for channels, roles and the guild entity, and one for members. A miss on
    /// either channels or roles always requests both, and every fresh category
    /// in a response is cached even if it was not asked for. Stale results are
    /// returned but not cached locally.
    pub async fn get_many(
        &self,
        guild_id: u64,
        categories: &BTreeSet<Category>,
    ) -> BTreeMap<Category, Result<ResourcePayload, ApiError>> {
        let mut results = BTreeMap::new();
        let mut misses = BTreeSet::new();

        for &category in categories {
            if !category.is_resource() {
                results.insert(category, Err(not_requestable(category)));
                continue;
            }

            match self.store.get(&CacheKey::guild(category, guild_id), ReadMode::Fresh) {
                Some(cached) => {
                    results.insert(category, Ok(cached.value));
                }
                None => {
                    misses.insert(category);
                }
            }
        }

        if misses.is_empty() {
            return results;
        }

        let (combined, members) = plan_calls(&misses);

        let combined_call = async {
            match combined.is_empty() {
                true => None,
                false => Some(self.api.resources(guild_id, &combined).await),
            }
        };
        let members_call = async {
            match members.is_empty() {
                true => None,
                false => Some(self.api.resources(guild_id, &members).await),
            }
        };
        let (combined_response, members_response) = tokio::join!(combined_call, members_call);

        for (requested, response) in [(combined, combined_response), (members, members_response)] {
            if let Some(response) = response {
                self.absorb(guild_id, &requested, &misses, response, &mut results);
            }
        }

        results
    }

    /// Warms the cache for `categories` in the background of a caller's flow.
    ///
    /// Categories already fresh locally are skipped and failures are only logged;
    /// the result is never needed for correctness.
    pub async fn prefetch(&self, guild_id: u64, categories: &BTreeSet<Category>) {
        let cold: BTreeSet<Category> = categories
            .iter()
            .copied()
            .filter(|category| category.is_resource())
            .filter(|category| {
                self.store
                    .get(&CacheKey::guild(*category, guild_id), ReadMode::Fresh)
                    .is_none()
            })
            .collect();

        if cold.is_empty() {
            return;
        }

        for (category, result) in self.get_many(guild_id, &cold).await {
            if let Err(e) = result {
                tracing::debug!("Prefetch of {} for guild {} failed: {}", category, guild_id, e);
            }
        }
    }

    /// Drops one locally cached category, e.g. after the user changed it.
    pub fn invalidate(&self, guild_id: u64, category: Category) {
        self.store.invalidate(&CacheKey::guild(category, guild_id));
    }

    /// Drops every locally cached category of a guild.
    pub fn invalidate_guild(&self, guild_id: u64) {
        self.store.invalidate_scope(&guild_id.to_string());
    }

    /// Whether `category` is fresh in the local cache.
    pub fn is_warm(&self, guild_id: u64, category: Category) -> bool {
        self.store
            .get(&CacheKey::guild(category, guild_id), ReadMode::Fresh)
            .is_some()
    }

    fn absorb(
        &self,
        guild_id: u64,
        requested: &BTreeSet<Category>,
        misses: &BTreeSet<Category>,
        response: Result<GuildResourcesDto, ApiError>,
        results: &mut BTreeMap<Category, Result<ResourcePayload, ApiError>>,
    ) {
        let mut dto = match response {
            Ok(dto) => dto,
            Err(e) => {
                for category in requested.intersection(misses) {
                    results.insert(*category, Err(e.clone()));
                }
                return;
            }
        };

        for category in requested {
            let outcome = match dto.resources.remove(category) {
                Some(CategoryResultDto::Fresh { payload }) => {
                    self.store
                        .set(CacheKey::guild(*category, guild_id), payload.clone());
                    Ok(payload)
                }
                Some(CategoryResultDto::Stale { payload, .. }) => Ok(payload),
                Some(CategoryResultDto::Error {
                    http_status,
                    message,
                    ..
                }) => Err(ApiError::new(
                    http_status.map(u64::from).unwrap_or(502),
                    message,
                )),
                None => Err(ApiError::new(
                    500,
                    format!("Response did not include {}", category),
                )),
            };

            if misses.contains(category) {
                results.insert(*category, outcome);
            }
        }
    }
}

/// Splits missing categories into the combined call and the members call.
fn plan_calls(misses: &BTreeSet<Category>) -> (BTreeSet<Category>, BTreeSet<Category>) {
    let mut combined: BTreeSet<Category> = misses
        .iter()
        .copied()
        .filter(|category| COMBINED.contains(category))
        .collect();

    if combined.contains(&Category::Channels) || combined.contains(&Category::Roles) {
        combined.insert(Category::Channels);
        combined.insert(Category::Roles);
    }

    let members = misses
        .iter()
        .copied()
        .filter(|category| *category == Category::Members)
        .collect();

    (combined, members)
}

fn not_requestable(category: Category) -> ApiError {
    ApiError::new(400, format!("Category {} cannot be requested", category))
}
