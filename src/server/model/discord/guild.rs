//! Discord guild entity as returned by the upstream API.

use serde::Deserialize;
use serenity::all::{GuildId, UserId};

use crate::model::discord::DiscordGuildDto;

/// Guild record from `GET /guilds/{guild_id}?with_counts=true`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamGuild {
    pub id: GuildId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub owner_id: UserId,
    #[serde(default)]
    pub approximate_member_count: Option<u64>,
}

impl UpstreamGuild {
    pub fn into_dto(self) -> DiscordGuildDto {
        DiscordGuildDto {
            id: self.id.get(),
            name: self.name,
            icon: self.icon,
            owner_id: self.owner_id.get(),
            approximate_member_count: self.approximate_member_count,
        }
    }
}
