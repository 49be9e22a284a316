//! Discord guild role as returned by the upstream API.

use serde::Deserialize;
use serenity::all::RoleId;

use crate::model::discord::DiscordRoleDto;

/// Role record from `GET /guilds/{guild_id}/roles`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamRole {
    pub id: RoleId,
    pub name: String,
    /// RGB color as a 24-bit integer, 0 when the role has no color.
    #[serde(default)]
    pub color: u32,
    /// Role position in the guild's role hierarchy (higher = more important).
    #[serde(default)]
    pub position: i16,
    /// Whether the role is managed by an integration.
    #[serde(default)]
    pub managed: bool,
}

impl UpstreamRole {
    /// Converts the upstream record to a DTO, formatting the color as `#RRGGBB`.
    pub fn into_dto(self) -> DiscordRoleDto {
        DiscordRoleDto {
            id: self.id.get(),
            name: self.name,
            color: format!("#{:06X}", self.color & 0x00FF_FFFF),
            position: self.position,
            managed: self.managed,
        }
    }
}
