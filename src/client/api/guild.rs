use std::{collections::BTreeSet, future::Future};

use crate::{
    cache::Category,
    client::model::error::ApiError,
    model::resource::GuildResourcesDto,
};

use super::helper::{get, parse_response, send_request};

/// Transport used by the client cache to reach the bulk resource endpoint.
pub trait GuildApi: Send + Sync {
    /// Requests `categories` for `guild_id` in a single call.
    fn resources(
        &self,
        guild_id: u64,
        categories: &BTreeSet<Category>,
    ) -> impl Future<Output = Result<GuildResourcesDto, ApiError>> + Send;
}

/// `GuildApi` over HTTP, authenticated with the user's session credential.
#[derive(Clone)]
pub struct HttpGuildApi {
    http_client: reqwest::Client,
    base_url: String,
    credential: String,
}

impl HttpGuildApi {
    /// # Arguments
    /// - `http_client` - Shared reqwest client
    /// - `base_url` - Base URL of the guildboard server, e.g. `http://localhost:8080`
    /// - `credential` - Session credential sent as a bearer token
    pub fn new(http_client: reqwest::Client, base_url: &str, credential: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential: credential.to_string(),
        }
    }
}

impl GuildApi for HttpGuildApi {
    async fn resources(
        &self,
        guild_id: u64,
        categories: &BTreeSet<Category>,
    ) -> Result<GuildResourcesDto, ApiError> {
        let categories = categories
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/api/guilds/{}/resources?categories={}",
            self.base_url, guild_id, categories
        );

        let response = send_request(get(&self.http_client, &url, &self.credential)).await?;
        parse_response(response).await
    }
}
