use serenity::async_trait;
use std::{sync::Arc, time::Duration};

use crate::{
    cache::Category,
    model::resource::ResourcePayload,
    server::{
        error::fetch::FetchError, model::discord::UpstreamMember,
        service::discord::{api::DiscordApi, ResourceFetcher},
    },
};

/// Maximum page size accepted by the list guild members route.
const MEMBER_PAGE_LIMIT: u32 = 1000;

/// Fetches a guild's members and projects each one down to the minimal fields
/// the dashboard uses (ID, names, discriminator, avatar, nickname).
pub struct MemberFetcher {
    api: DiscordApi,
    timeout: Duration,
}

impl MemberFetcher {
    pub fn new(api: DiscordApi, timeout: Duration) -> Self {
        Self { api, timeout }
    }
}

#[async_trait]
impl ResourceFetcher for MemberFetcher {
    fn category(&self) -> Category {
        Category::Members
    }

    async fn fetch(&self, guild_id: u64) -> Result<ResourcePayload, FetchError> {
        let members: Vec<UpstreamMember> = self
            .api
            .get_json(
                &format!("/guilds/{}/members?limit={}", guild_id, MEMBER_PAGE_LIMIT),
                self.timeout,
            )
            .await?;

        let members = members.into_iter().map(UpstreamMember::into_dto).collect();

        Ok(ResourcePayload::Members(Arc::new(members)))
    }
}
