use serenity::async_trait;
use std::{sync::Arc, time::Duration};

use crate::{
    cache::Category,
    model::resource::ResourcePayload,
    server::{
        error::fetch::FetchError, model::discord::UpstreamGuild,
        service::discord::{api::DiscordApi, ResourceFetcher},
    },
};

/// Fetches the guild entity itself, including approximate member counts.
pub struct GuildFetcher {
    api: DiscordApi,
    timeout: Duration,
}

impl GuildFetcher {
    pub fn new(api: DiscordApi, timeout: Duration) -> Self {
        Self { api, timeout }
    }
}

#[async_trait]
impl ResourceFetcher for GuildFetcher {
    fn category(&self) -> Category {
        Category::Guild
    }

    async fn fetch(&self, guild_id: u64) -> Result<ResourcePayload, FetchError> {
        let guild: UpstreamGuild = self
            .api
            .get_json(&format!("/guilds/{}?with_counts=true", guild_id), self.timeout)
            .await?;

        Ok(ResourcePayload::Guild(Arc::new(guild.into_dto())))
    }
}
