//! Upstream resource fetchers.
//!
//! One `ResourceFetcher` exists per resource category. A fetcher performs exactly
//! one bounded upstream call and translates failures into `FetchError`; it never
//! touches the cache, which is the aggregator's concern.

pub mod api;
pub mod channel;
pub mod guild;
pub mod guild_member;
pub mod mutation;
pub mod role;

#[cfg(test)]
mod test;

use serenity::async_trait;
use std::sync::Arc;

use crate::{
    cache::Category,
    model::resource::ResourcePayload,
    server::{config::FetchTimeouts, error::fetch::FetchError},
};

pub use api::DiscordApi;
pub use channel::ChannelFetcher;
pub use guild::GuildFetcher;
pub use guild_member::MemberFetcher;
pub use mutation::DiscordMutationService;
pub use role::RoleFetcher;

#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Category this fetcher produces.
    fn category(&self) -> Category;

    /// Fetches the resource for `guild_id` with a single bounded upstream call.
    async fn fetch(&self, guild_id: u64) -> Result<ResourcePayload, FetchError>;
}

/// Builds the Discord-backed fetcher for every resource category.
pub fn discord_fetchers(api: DiscordApi, timeouts: FetchTimeouts) -> Vec<Arc<dyn ResourceFetcher>> {
    vec![
        Arc::new(ChannelFetcher::new(api.clone(), timeouts.channels)),
        Arc::new(RoleFetcher::new(api.clone(), timeouts.roles)),
        Arc::new(MemberFetcher::new(api.clone(), timeouts.members)),
        Arc::new(GuildFetcher::new(api, timeouts.guild)),
    ]
}
