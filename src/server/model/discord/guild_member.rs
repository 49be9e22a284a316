//! Discord guild member as returned by the upstream API, and its projection.

use serde::Deserialize;
use serenity::all::UserId;

use crate::model::discord::DiscordMemberDto;

/// User object nested in a member record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Member record from `GET /guilds/{guild_id}/members`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamMember {
    pub user: UpstreamUser,
    #[serde(default)]
    pub nick: Option<String>,
    /// Guild-specific avatar hash, overriding the user's avatar.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UpstreamMember {
    /// Projects the member down to the fields the dashboard needs.
    ///
    /// The display name falls back to the username when no global name is set. A
    /// discriminator of "0" marks an account migrated to unique usernames and is
    /// dropped.
    pub fn into_dto(self) -> DiscordMemberDto {
        let user = self.user;
        let display_name = user
            .global_name
            .clone()
            .unwrap_or_else(|| user.username.clone());
        let discriminator = user.discriminator.filter(|d| d != "0");

        DiscordMemberDto {
            user_id: user.id.get(),
            username: user.username,
            display_name,
            discriminator,
            avatar: self.avatar.or(user.avatar),
            nickname: self.nick,
        }
    }
}
