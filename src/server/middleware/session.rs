//! Session gate with a short-lived cache of validated credentials.
//!
//! Dashboards fire several API calls per page load with the same credential. The
//! gate validates a credential once, then answers the rest of the burst from a
//! `Category::Session` cache keyed by the exact credential blob. Only successful
//! validations are cached, so a rejected credential never blocks a later retry.

use std::{collections::HashMap, sync::Arc};

use crate::{
    cache::{CacheKey, Category, ReadMode, TtlStore},
    server::{
        error::auth::AuthError,
        model::user::{GuildGrant, Principal},
        service::auth::SessionValidator,
    },
};

/// Guild grants of one credential, keyed by guild ID.
pub type GuildGrants = Arc<HashMap<u64, GuildGrant>>;

pub struct SessionGate {
    cache: Arc<TtlStore<Principal>>,
    grants: Arc<TtlStore<GuildGrants>>,
    validator: Arc<dyn SessionValidator>,
}

impl SessionGate {
    /// Creates a new gate.
    ///
    /// # Arguments
    /// - `cache` - Store holding validated principals; its `Session` TTL bounds
    ///   how long a validation is reused
    /// - `grants` - Store holding each credential's guild grants, same TTL rules
    /// - `validator` - Full validation, called once per cache miss
    pub fn new(
        cache: Arc<TtlStore<Principal>>,
        grants: Arc<TtlStore<GuildGrants>>,
        validator: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            cache,
            grants,
            validator,
        }
    }

    pub fn cache(&self) -> &Arc<TtlStore<Principal>> {
        &self.cache
    }

    pub fn grants(&self) -> &Arc<TtlStore<GuildGrants>> {
        &self.grants
    }

    /// Resolves the principal behind `credential`.
    ///
    /// # Returns
    /// - `Ok(Principal)` - Credential is cached as valid or passed full validation
    /// - `Err(AuthError::Unauthorized)` - Credential is missing, empty, rejected, or
    ///   validation itself failed
    pub async fn authorize(&self, credential: Option<&str>) -> Result<Principal, AuthError> {
        let Some(credential) = credential.filter(|c| !c.trim().is_empty()) else {
            return Err(AuthError::Unauthorized);
        };

        let key = CacheKey::new(Category::Session, credential);
        if let Some(cached) = self.cache.get(&key, ReadMode::Fresh) {
            return Ok(cached.value);
        }

        match self.validator.validate(credential).await {
            Ok(principal) => {
                tracing::debug!("Validated session for user {}", principal.user_id);
                self.cache.set(key, principal.clone());
                Ok(principal)
            }
            Err(e) => {
                tracing::debug!("Rejected session credential: {}", e);
                Err(AuthError::Unauthorized)
            }
        }
    }

    /// Looks up what `principal` may do in `guild_id`.
    ///
    /// The full guild list is fetched once per credential and cached with the
    /// session TTL, so a page load checking several routes costs one upstream call.
    ///
    /// # Returns
    /// - `Ok(Some(GuildGrant))` - The user belongs to the guild
    /// - `Ok(None)` - The user does not belong to the guild
    /// - `Err(AuthError::Unauthorized)` - The guild list could not be obtained
    pub async fn guild_grant(
        &self,
        principal: &Principal,
        guild_id: u64,
    ) -> Result<Option<GuildGrant>, AuthError> {
        let key = CacheKey::new(Category::Session, principal.access_token.secret());
        if let Some(cached) = self.grants.get(&key, ReadMode::Fresh) {
            return Ok(cached.value.get(&guild_id).copied());
        }

        let grants: GuildGrants = match self.validator.guilds(principal).await {
            Ok(grants) => Arc::new(
                grants
                    .into_iter()
                    .map(|grant| (grant.guild_id, grant))
                    .collect(),
            ),
            Err(e) => {
                tracing::debug!(
                    "Failed to list guilds for user {}: {}",
                    principal.user_id,
                    e
                );
                return Err(AuthError::Unauthorized);
            }
        };

        let grant = grants.get(&guild_id).copied();
        self.grants.set(key, grants);
        Ok(grant)
    }

    /// Forgets a cached credential and its guild grants, e.g. on logout.
    ///
    /// # Returns
    /// - `true` - Something was cached for the credential
    /// - `false` - Nothing was cached
    pub fn revoke(&self, credential: &str) -> bool {
        let key = CacheKey::new(Category::Session, credential);
        let principal = self.cache.invalidate(&key);
        let grants = self.grants.invalidate(&key);
        principal || grants
    }
}
