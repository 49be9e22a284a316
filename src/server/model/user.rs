//! Authenticated principal produced by the session gate, and the per-guild grants
//! looked up for it.

use serde::Deserialize;
use serenity::all::{GuildId, Permissions, UserId};
use std::{fmt, sync::Arc};

/// User OAuth2 access token the principal was validated with.
///
/// Kept so calls made on the user's behalf can reuse it. Not serializable, and
/// its `Debug` output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Arc<str>);

impl AccessToken {
    pub fn new(token: &str) -> Self {
        Self(Arc::from(token))
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Identity behind a validated session credential.
///
/// Opaque to the caching layer; it is cached per credential and handed to request
/// handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Discord user ID.
    pub user_id: u64,
    /// Discord username.
    pub username: String,
    /// Upstream bearer credential.
    pub access_token: AccessToken,
}

/// User record from `GET /users/@me`.
#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

impl CurrentUser {
    pub fn into_principal(self, access_token: AccessToken) -> Principal {
        Principal {
            user_id: self.id.get(),
            username: self.username,
            access_token,
        }
    }
}

/// What the principal may do in one guild they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildGrant {
    pub guild_id: u64,
    /// Owner, administrator or holder of Manage Server.
    pub can_manage: bool,
}

/// Partial guild from `GET /users/@me/guilds`.
#[derive(Debug, Deserialize)]
pub struct UserGuild {
    pub id: GuildId,
    #[serde(default)]
    pub owner: bool,
    /// Permission bitset of the user in this guild, as a decimal string.
    #[serde(default)]
    pub permissions: Option<String>,
}

impl UserGuild {
    pub fn into_grant(self) -> GuildGrant {
        let permissions = self
            .permissions
            .as_deref()
            .and_then(|bits| bits.parse::<u64>().ok())
            .map(Permissions::from_bits_truncate)
            .unwrap_or_else(Permissions::empty);

        GuildGrant {
            guild_id: self.id.get(),
            can_manage: self.owner
                || permissions.contains(Permissions::ADMINISTRATOR)
                || permissions.contains(Permissions::MANAGE_GUILD),
        }
    }
}
