//! Bot-side writes to Discord on behalf of dashboard users.
//!
//! Every successful mutation invalidates the cached category it affects so the
//! next resolve for that guild goes back upstream instead of serving data from
//! before the change.

use serenity::{
    all::{ChannelType, CreateChannel, EditRole, GuildId},
    http::Http,
};
use std::sync::Arc;

use crate::{
    cache::Category,
    model::discord::{DiscordChannelDto, DiscordRoleDto},
    server::{error::AppError, service::aggregator::Aggregator},
};

pub struct DiscordMutationService<'a> {
    http: &'a Arc<Http>,
    aggregator: &'a Aggregator,
}

impl<'a> DiscordMutationService<'a> {
    pub fn new(http: &'a Arc<Http>, aggregator: &'a Aggregator) -> Self {
        Self { http, aggregator }
    }

    /// Creates a text channel in the guild and invalidates its cached channels.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `name` - Name of the new channel
    ///
    /// # Returns
    /// - `Ok(DiscordChannelDto)` - The created channel
    /// - `Err(AppError::BadRequest)` - Empty name or zero guild ID
    /// - `Err(AppError::DiscordErr)` - Discord rejected the request
    pub async fn create_text_channel(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<DiscordChannelDto, AppError> {
        let guild = to_guild_id(guild_id)?;
        let name = validate_name(name)?;

        let channel = guild
            .create_channel(self.http, CreateChannel::new(name).kind(ChannelType::Text))
            .await?;

        self.aggregator.invalidate(Category::Channels, guild_id);
        tracing::info!("Created channel {} in guild {}", channel.id, guild_id);

        Ok(DiscordChannelDto {
            id: channel.id.get(),
            name: channel.name,
            kind: u8::from(channel.kind),
            position: i32::from(channel.position),
            parent_id: channel.parent_id.map(|id| id.get()),
        })
    }

    /// Creates a role in the guild and invalidates its cached roles.
    ///
    /// # Returns
    /// - `Ok(DiscordRoleDto)` - The created role
    /// - `Err(AppError::BadRequest)` - Empty name or zero guild ID
    /// - `Err(AppError::DiscordErr)` - Discord rejected the request
    pub async fn create_role(&self, guild_id: u64, name: &str) -> Result<DiscordRoleDto, AppError> {
        let guild = to_guild_id(guild_id)?;
        let name = validate_name(name)?;

        let role = guild
            .create_role(self.http, EditRole::new().name(name))
            .await?;

        self.aggregator.invalidate(Category::Roles, guild_id);
        tracing::info!("Created role {} in guild {}", role.id, guild_id);

        Ok(DiscordRoleDto {
            id: role.id.get(),
            name: role.name,
            color: format!("#{:06X}", role.colour.0 & 0x00FF_FFFF),
            position: role.position as i16,
            managed: role.managed,
        })
    }
}

fn to_guild_id(guild_id: u64) -> Result<GuildId, AppError> {
    if guild_id == 0 {
        return Err(AppError::BadRequest("Guild ID must be non-zero".to_string()));
    }
    Ok(GuildId::new(guild_id))
}

fn validate_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Err(AppError::BadRequest(
            "Name must be between 1 and 100 characters".to_string(),
        ));
    }
    Ok(name)
}
