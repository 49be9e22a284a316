use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        discord::{CreateNamedDto, DiscordChannelDto, DiscordRoleDto},
    },
    server::{
        controller::guild::GUILD_TAG,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::discord::DiscordMutationService,
        state::AppState,
    },
};

/// Create a text channel in a guild.
///
/// The bot creates the channel on Discord, after which the guild's cached channel
/// list is invalidated so the next read reflects the change.
///
/// # Returns
/// - `201 Created` - The created channel
/// - `400 Bad Request` - Invalid name
/// - `401 Unauthorized` - Missing or invalid credential
/// - `403 Forbidden` - The caller cannot manage the guild
/// - `502 Bad Gateway` - Discord rejected the request
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/channels",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = CreateNamedDto,
    responses(
        (status = 201, description = "Channel created", body = DiscordChannelDto),
        (status = 400, description = "Invalid name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 502, description = "Discord request failed", body = ErrorDto)
    ),
)]
pub async fn create_guild_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreateNamedDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.session_gate, &headers)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let service = DiscordMutationService::new(&state.discord_http, &state.aggregator);
    let channel = service.create_text_channel(guild_id, &payload.name).await?;

    tracing::debug!("User {} created channel {}", principal.user_id, channel.id);

    Ok((StatusCode::CREATED, Json(channel)))
}

/// Create a role in a guild.
///
/// Invalidates the guild's cached roles after a successful creation.
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/roles",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = CreateNamedDto,
    responses(
        (status = 201, description = "Role created", body = DiscordRoleDto),
        (status = 400, description = "Invalid name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto),
        (status = 502, description = "Discord request failed", body = ErrorDto)
    ),
)]
pub async fn create_guild_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreateNamedDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.session_gate, &headers)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    let service = DiscordMutationService::new(&state.discord_http, &state.aggregator);
    let role = service.create_role(guild_id, &payload.name).await?;

    tracing::debug!("User {} created role {}", principal.user_id, role.id);

    Ok((StatusCode::CREATED, Json(role)))
}
