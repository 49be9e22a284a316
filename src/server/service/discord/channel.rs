use serenity::async_trait;
use std::{sync::Arc, time::Duration};

use crate::{
    cache::Category,
    model::resource::ResourcePayload,
    server::{
        error::fetch::FetchError, model::discord::UpstreamChannel,
        service::discord::{api::DiscordApi, ResourceFetcher},
    },
};

/// Fetches a guild's channels, ordered by position.
pub struct ChannelFetcher {
    api: DiscordApi,
    timeout: Duration,
}

impl ChannelFetcher {
    pub fn new(api: DiscordApi, timeout: Duration) -> Self {
        Self { api, timeout }
    }
}

#[async_trait]
impl ResourceFetcher for ChannelFetcher {
    fn category(&self) -> Category {
        Category::Channels
    }

    async fn fetch(&self, guild_id: u64) -> Result<ResourcePayload, FetchError> {
        let channels: Vec<UpstreamChannel> = self
            .api
            .get_json(&format!("/guilds/{}/channels", guild_id), self.timeout)
            .await?;

        let mut channels: Vec<_> = channels.into_iter().map(UpstreamChannel::into_dto).collect();
        channels.sort_by_key(|channel| (channel.position, channel.id));

        Ok(ResourcePayload::Channels(Arc::new(channels)))
    }
}
