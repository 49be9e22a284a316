//! Discord guild channel as returned by the upstream API.

use serde::Deserialize;
use serenity::all::ChannelId;

use crate::model::discord::DiscordChannelDto;

/// Channel record from `GET /guilds/{guild_id}/channels`.
///
/// Only the fields the dashboard renders are decoded; Discord sends many more.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamChannel {
    pub id: ChannelId,
    #[serde(default)]
    pub name: Option<String>,
    /// Discord channel type.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Position in the guild's channel list (for display ordering).
    #[serde(default)]
    pub position: i32,
    /// Category channel this channel is nested under.
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
}

impl UpstreamChannel {
    /// Converts the upstream record to a DTO for caching and API responses.
    pub fn into_dto(self) -> DiscordChannelDto {
        DiscordChannelDto {
            id: self.id.get(),
            name: self.name.unwrap_or_default(),
            kind: self.kind,
            position: self.position,
            parent_id: self.parent_id.map(|id| id.get()),
        }
    }
}
