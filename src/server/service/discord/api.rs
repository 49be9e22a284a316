//! Bot-authenticated access to the Discord REST API.

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};

use crate::server::error::fetch::FetchError;

/// Thin wrapper issuing bot-authenticated GET requests against the Discord API.
///
/// Cheap to clone; the reqwest client and token are shared.
#[derive(Clone)]
pub struct DiscordApi {
    http_client: reqwest::Client,
    base_url: Arc<str>,
    bot_token: Arc<str>,
}

impl DiscordApi {
    /// Creates a new API wrapper.
    ///
    /// # Arguments
    /// - `http_client` - Shared reqwest client
    /// - `base_url` - API base without trailing slash, e.g. `https://discord.com/api/v10`
    /// - `bot_token` - Bot token sent as `Authorization: Bot <token>`
    pub fn new(http_client: reqwest::Client, base_url: &str, bot_token: &str) -> Self {
        Self {
            http_client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            bot_token: Arc::from(bot_token),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one GET request to `path` and decodes the JSON body.
    ///
    /// The whole exchange, body included, is bounded by `timeout`. When the bound is
    /// hit the in-flight request future is dropped, which cancels the call.
    ///
    /// # Returns
    /// - `Ok(T)` - 2xx response with a decodable body
    /// - `Err(FetchError::Timeout)` - No complete response within `timeout`
    /// - `Err(FetchError::NotFound)` - 404 response
    /// - `Err(FetchError::Upstream)` - Any other non-success status
    /// - `Err(FetchError::Transport)` - The request could not be sent
    /// - `Err(FetchError::Decode)` - The body did not match `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let exchange = async {
            let response = self
                .http_client
                .get(&url)
                .header(AUTHORIZATION, format!("Bot {}", self.bot_token))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::from_status(status.as_u16()));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| FetchError::Decode(e.to_string()))
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        }
    }
}
