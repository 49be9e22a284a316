use axum::{
    routing::{delete, get},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    cache::Category,
    model::{
        api::ErrorDto,
        discord::{
            CreateNamedDto, DiscordChannelDto, DiscordGuildDto, DiscordMemberDto, DiscordRoleDto,
        },
        resource::{CategoryResultDto, FetchErrorKind, GuildResourcesDto, ResourcePayload},
    },
    server::{
        controller::{
            channel::{create_guild_channel, create_guild_role},
            guild::{
                get_guild, get_guild_channels, get_guild_members, get_guild_resources,
                get_guild_roles, invalidate_guild_cache,
            },
            session::logout,
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::server::controller::guild::get_guild_resources,
        crate::server::controller::guild::get_guild_channels,
        crate::server::controller::guild::get_guild_roles,
        crate::server::controller::guild::get_guild_members,
        crate::server::controller::guild::get_guild,
        crate::server::controller::guild::invalidate_guild_cache,
        crate::server::controller::channel::create_guild_channel,
        crate::server::controller::channel::create_guild_role,
        crate::server::controller::session::logout,
    ),
    components(schemas(
        Category,
        ErrorDto,
        CreateNamedDto,
        DiscordChannelDto,
        DiscordRoleDto,
        DiscordMemberDto,
        DiscordGuildDto,
        ResourcePayload,
        FetchErrorKind,
        CategoryResultDto,
        GuildResourcesDto,
    )),
    tags(
        (name = "guild", description = "Cached Discord guild resources"),
        (name = "session", description = "Dashboard session state")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/guilds/{guild_id}", get(get_guild))
        .route("/api/guilds/{guild_id}/resources", get(get_guild_resources))
        .route(
            "/api/guilds/{guild_id}/channels",
            get(get_guild_channels).post(create_guild_channel),
        )
        .route(
            "/api/guilds/{guild_id}/roles",
            get(get_guild_roles).post(create_guild_role),
        )
        .route("/api/guilds/{guild_id}/members", get(get_guild_members))
        .route("/api/guilds/{guild_id}/cache", delete(invalidate_guild_cache))
        .route("/api/session", delete(logout))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
