use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    cache::{Category, TtlPolicy},
    model::{
        api::ErrorDto,
        discord::{DiscordChannelDto, DiscordGuildDto, DiscordMemberDto, DiscordRoleDto},
        resource::{GuildResourcesDto, ResourcePayload},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::aggregator::Resolution,
        state::AppState,
    },
};

/// Tag for grouping guild resource endpoints in OpenAPI documentation
pub static GUILD_TAG: &str = "guild";

/// Response header labelling a single-category response as `fresh` or `stale`.
pub const CACHE_STATUS_HEADER: &str = "x-cache-status";

/// Cache-Control for responses that include expired data, so downstream caches
/// check again on the next request.
const REVALIDATE: &str = "private, max-age=0, must-revalidate";

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResourceQuery {
    /// Comma separated categories (`channels`, `roles`, `members`, `guild`).
    /// Defaults to `channels,roles`.
    pub categories: Option<String>,
}

/// Get several resource categories for a guild in one call.
///
/// Each requested category is resolved independently from the cache or upstream;
/// the body reports every category as `fresh`, `stale` or `error`, so a failing
/// member list does not prevent channels and roles from being returned.
///
/// # Returns
/// - `200 OK` - Per-category results, with `Cache-Control` reflecting freshness
/// - `400 Bad Request` - Unknown category name
/// - `401 Unauthorized` - Missing or invalid credential
/// - `403 Forbidden` - The caller is not a member of the guild
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/resources",
    tag = GUILD_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ResourceQuery
    ),
    responses(
        (status = 200, description = "Per-category resolution results", body = GuildResourcesDto),
        (status = 400, description = "Unknown category", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member of the guild", body = ErrorDto)
    ),
)]
pub async fn get_guild_resources(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Query(query): Query<ResourceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.session_gate, &headers)
        .require(&[Permission::Member(guild_id)])
        .await?;

    let categories = parse_categories(query.categories.as_deref())?;
    let resolved = state.aggregator.resolve(guild_id, &categories).await;
    let cache_control = cache_control_for(&resolved, state.aggregator.store().policy());

    let dto = GuildResourcesDto {
        guild_id,
        resources: resolved
            .into_iter()
            .map(|(category, resolution)| (category, resolution.into_dto()))
            .collect(),
    };

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, cache_control)],
        Json(dto),
    ))
}

/// Get a guild's channels.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/channels",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Guild channels", body = Vec<DiscordChannelDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member of the guild", body = ErrorDto),
        (status = 404, description = "Guild not found upstream", body = ErrorDto),
        (status = 502, description = "Upstream failure with no cached fallback", body = ErrorDto),
        (status = 504, description = "Upstream timeout with no cached fallback", body = ErrorDto)
    ),
)]
pub async fn get_guild_channels(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<Response, AppError> {
    resolve_single(&state, &headers, guild_id, Category::Channels).await
}

/// Get a guild's roles.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/roles",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Guild roles", body = Vec<DiscordRoleDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member of the guild", body = ErrorDto),
        (status = 404, description = "Guild not found upstream", body = ErrorDto),
        (status = 502, description = "Upstream failure with no cached fallback", body = ErrorDto),
        (status = 504, description = "Upstream timeout with no cached fallback", body = ErrorDto)
    ),
)]
pub async fn get_guild_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<Response, AppError> {
    resolve_single(&state, &headers, guild_id, Category::Roles).await
}

/// Get a guild's members.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/members",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Guild members", body = Vec<DiscordMemberDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member of the guild", body = ErrorDto),
        (status = 404, description = "Guild not found upstream", body = ErrorDto),
        (status = 429, description = "Rate limited with no cached fallback", body = ErrorDto),
        (status = 502, description = "Upstream failure with no cached fallback", body = ErrorDto),
        (status = 504, description = "Upstream timeout with no cached fallback", body = ErrorDto)
    ),
)]
pub async fn get_guild_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<Response, AppError> {
    resolve_single(&state, &headers, guild_id, Category::Members).await
}

/// Get the guild entity.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Guild", body = DiscordGuildDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not a member of the guild", body = ErrorDto),
        (status = 404, description = "Guild not found upstream", body = ErrorDto),
        (status = 502, description = "Upstream failure with no cached fallback", body = ErrorDto),
        (status = 504, description = "Upstream timeout with no cached fallback", body = ErrorDto)
    ),
)]
pub async fn get_guild(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<Response, AppError> {
    resolve_single(&state, &headers, guild_id, Category::Guild).await
}

/// Drop every cached category of a guild.
///
/// Only callers who can manage the guild may force upstream refetches.
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/cache",
    tag = GUILD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 204, description = "Cache cleared for the guild"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User cannot manage the guild", body = ErrorDto)
    ),
)]
pub async fn invalidate_guild_cache(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.session_gate, &headers)
        .require(&[Permission::ManageGuild(guild_id)])
        .await?;

    state.aggregator.invalidate_guild(guild_id);

    Ok(StatusCode::NO_CONTENT)
}

async fn resolve_single(
    state: &AppState,
    headers: &HeaderMap,
    guild_id: u64,
    category: Category,
) -> Result<Response, AppError> {
    let _ = AuthGuard::new(&state.session_gate, headers)
        .require(&[Permission::Member(guild_id)])
        .await?;

    let Some(resolution) = state.aggregator.resolve_one(guild_id, category).await else {
        return Err(AppError::InternalError(format!(
            "No fetcher registered for {}",
            category
        )));
    };

    let (payload, cache_control, status) = match resolution {
        Resolution::Fresh(payload) => {
            let max_age = state.aggregator.store().policy().ttl(category).as_secs();
            (payload, format!("private, max-age={}", max_age), "fresh")
        }
        Resolution::Stale { payload, .. } => (payload, REVALIDATE.to_string(), "stale"),
        Resolution::Failed(err) => return Err(err.into()),
    };

    let body = match payload {
        ResourcePayload::Channels(channels) => Json(channels).into_response(),
        ResourcePayload::Roles(roles) => Json(roles).into_response(),
        ResourcePayload::Members(members) => Json(members).into_response(),
        ResourcePayload::Guild(guild) => Json(guild).into_response(),
    };

    Ok((
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, cache_control),
            (HeaderName::from_static(CACHE_STATUS_HEADER), status.to_string()),
        ],
        body,
    )
        .into_response())
}

/// Parses the `categories` query parameter.
///
/// # Returns
/// - `Ok(BTreeSet<Category>)` - Requested categories, `channels` and `roles` when absent or empty
/// - `Err(AppError::BadRequest)` - A name is not a requestable category
pub fn parse_categories(raw: Option<&str>) -> Result<BTreeSet<Category>, AppError> {
    let categories = raw
        .unwrap_or_default()
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.parse::<Category>())
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if categories.is_empty() {
        return Ok(BTreeSet::from([Category::Channels, Category::Roles]));
    }

    Ok(categories)
}

/// Chooses the Cache-Control value for a bulk response.
///
/// All fresh results may be cached for the shortest TTL among them. Any stale or
/// failed category means the response should be re-checked immediately, and a
/// response made only of failures must not be stored at all.
pub fn cache_control_for(
    resolved: &BTreeMap<Category, Resolution>,
    policy: &TtlPolicy,
) -> String {
    if resolved.values().all(|r| matches!(r, Resolution::Failed(_))) {
        return "no-store".to_string();
    }

    if resolved.values().all(Resolution::is_fresh) {
        let max_age = resolved
            .keys()
            .map(|category| policy.ttl(*category).as_secs())
            .min()
            .unwrap_or(0);
        return format!("private, max-age={}", max_age);
    }

    REVALIDATE.to_string()
}
