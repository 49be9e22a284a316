//! Full validation of user session credentials.
//!
//! The session gate calls a `SessionValidator` once per cache miss. The Discord
//! implementation treats the credential as a user OAuth2 access token and asks
//! Discord who it belongs to and which guilds they are in.

use reqwest::{header::AUTHORIZATION, StatusCode};
use serenity::async_trait;
use std::{sync::Arc, time::Duration};

use crate::server::{
    error::auth::AuthError,
    model::user::{AccessToken, CurrentUser, GuildGrant, Principal, UserGuild},
};

/// Time bound for one validation call.
const VALIDATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest page Discord returns from `/users/@me/guilds`.
const GUILD_PAGE_LIMIT: usize = 200;

#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Fully validates `credential`, returning the principal it belongs to.
    async fn validate(&self, credential: &str) -> Result<Principal, AuthError>;

    /// Lists the guilds `principal` belongs to with their management rights.
    async fn guilds(&self, principal: &Principal) -> Result<Vec<GuildGrant>, AuthError>;
}

/// Validates user access tokens against Discord's `GET /users/@me`.
pub struct DiscordSessionValidator {
    http_client: reqwest::Client,
    api_base: Arc<str>,
}

impl DiscordSessionValidator {
    /// Creates a new validator.
    ///
    /// # Arguments
    /// - `http_client` - Shared reqwest client
    /// - `api_base` - Discord API base URL without trailing slash
    pub fn new(http_client: reqwest::Client, api_base: &str) -> Self {
        Self {
            http_client,
            api_base: Arc::from(api_base.trim_end_matches('/')),
        }
    }

    /// Sends one user-authenticated GET and decodes a successful body.
    ///
    /// # Returns
    /// - `Ok(T)` - 2xx response with a decodable body
    /// - `Err(AuthError::Unauthorized)` - Discord answered 401 or 403
    /// - `Err(AuthError::Validation)` - Timeout, transport, decode or other status
    async fn get_as_user<T>(&self, url: String, token: &str) -> Result<T, AuthError>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = self
            .http_client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send();

        let response = tokio::time::timeout(VALIDATION_TIMEOUT, request)
            .await
            .map_err(|_| AuthError::Validation("validation request timed out".to_string()))?
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| AuthError::Validation(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::Unauthorized),
            status => Err(AuthError::Validation(format!(
                "unexpected status {} from Discord",
                status
            ))),
        }
    }
}

#[async_trait]
impl SessionValidator for DiscordSessionValidator {
    /// Fetches the current user for the bearer token.
    ///
    /// # Returns
    /// - `Ok(Principal)` - Token is valid
    /// - `Err(AuthError::Unauthorized)` - Discord rejected the token
    /// - `Err(AuthError::Validation)` - Discord could not be asked, or answered unexpectedly
    async fn validate(&self, credential: &str) -> Result<Principal, AuthError> {
        let user: CurrentUser = self
            .get_as_user(format!("{}/users/@me", self.api_base), credential)
            .await?;

        Ok(user.into_principal(AccessToken::new(credential)))
    }

    /// Pages through `GET /users/@me/guilds` with the principal's own token.
    ///
    /// # Returns
    /// - `Ok(Vec<GuildGrant>)` - One grant per guild the user is in
    /// - `Err(AuthError::Unauthorized)` - The token lacks the `guilds` scope or was revoked
    /// - `Err(AuthError::Validation)` - Discord could not be asked, or answered unexpectedly
    async fn guilds(&self, principal: &Principal) -> Result<Vec<GuildGrant>, AuthError> {
        let mut grants = Vec::new();
        let mut after: Option<u64> = None;

        loop {
            let mut url = format!(
                "{}/users/@me/guilds?limit={}",
                self.api_base, GUILD_PAGE_LIMIT
            );
            if let Some(after) = after {
                url.push_str(&format!("&after={}", after));
            }

            let page: Vec<UserGuild> = self
                .get_as_user(url, principal.access_token.secret())
                .await?;
            let full_page = page.len() >= GUILD_PAGE_LIMIT;

            grants.extend(page.into_iter().map(UserGuild::into_grant));
            after = grants.last().map(|grant| grant.guild_id);

            if !full_page {
                break;
            }
        }

        tracing::debug!(
            "User {} belongs to {} guilds",
            principal.user_id,
            grants.len()
        );
        Ok(grants)
    }
}
