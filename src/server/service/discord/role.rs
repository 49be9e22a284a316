use serenity::async_trait;
use std::{cmp::Reverse, sync::Arc, time::Duration};

use crate::{
    cache::Category,
    model::resource::ResourcePayload,
    server::{
        error::fetch::FetchError, model::discord::UpstreamRole,
        service::discord::{api::DiscordApi, ResourceFetcher},
    },
};

/// Fetches a guild's roles, highest in the hierarchy first.
pub struct RoleFetcher {
    api: DiscordApi,
    timeout: Duration,
}

impl RoleFetcher {
    pub fn new(api: DiscordApi, timeout: Duration) -> Self {
        Self { api, timeout }
    }
}

#[async_trait]
impl ResourceFetcher for RoleFetcher {
    fn category(&self) -> Category {
        Category::Roles
    }

    async fn fetch(&self, guild_id: u64) -> Result<ResourcePayload, FetchError> {
        let roles: Vec<UpstreamRole> = self
            .api
            .get_json(&format!("/guilds/{}/roles", guild_id), self.timeout)
            .await?;

        let mut roles: Vec<_> = roles.into_iter().map(UpstreamRole::into_dto).collect();
        roles.sort_by_key(|role| Reverse(role.position));

        Ok(ResourcePayload::Roles(Arc::new(roles)))
    }
}
