//! Payloads and per-category results of the guild resource aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    cache::Category,
    model::discord::{DiscordChannelDto, DiscordGuildDto, DiscordMemberDto, DiscordRoleDto},
};

/// A decoded upstream resource, tagged by the category it belongs to.
///
/// Lists are reference counted so that cache hits hand out clones without copying
/// the member list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ResourcePayload {
    #[cfg_attr(feature = "server", schema(value_type = Vec<DiscordChannelDto>))]
    Channels(Arc<Vec<DiscordChannelDto>>),
    #[cfg_attr(feature = "server", schema(value_type = Vec<DiscordRoleDto>))]
    Roles(Arc<Vec<DiscordRoleDto>>),
    #[cfg_attr(feature = "server", schema(value_type = Vec<DiscordMemberDto>))]
    Members(Arc<Vec<DiscordMemberDto>>),
    #[cfg_attr(feature = "server", schema(value_type = DiscordGuildDto))]
    Guild(Arc<DiscordGuildDto>),
}

impl ResourcePayload {
    pub fn category(&self) -> Category {
        match self {
            ResourcePayload::Channels(_) => Category::Channels,
            ResourcePayload::Roles(_) => Category::Roles,
            ResourcePayload::Members(_) => Category::Members,
            ResourcePayload::Guild(_) => Category::Guild,
        }
    }
}

/// Wire form of a fetch failure.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    Timeout,
    Upstream,
    NotFound,
    Transport,
    Decode,
}

/// Outcome of resolving one category.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CategoryResultDto {
    /// Served from a cache hit or a successful fetch.
    Fresh { payload: ResourcePayload },
    /// The live fetch failed and an expired entry was served instead.
    Stale {
        payload: ResourcePayload,
        stored_at: DateTime<Utc>,
    },
    Error {
        error: FetchErrorKind,
        /// Upstream HTTP status, for `upstream` and `not_found` errors.
        http_status: Option<u16>,
        message: String,
    },
}

impl CategoryResultDto {
    pub fn payload(&self) -> Option<&ResourcePayload> {
        match self {
            CategoryResultDto::Fresh { payload } | CategoryResultDto::Stale { payload, .. } => {
                Some(payload)
            }
            CategoryResultDto::Error { .. } => None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, CategoryResultDto::Fresh { .. })
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, CategoryResultDto::Stale { .. })
    }
}

/// Response of the bulk resource endpoint: one result per requested category.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GuildResourcesDto {
    #[serde(with = "crate::model::discord::snowflake")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub guild_id: u64,
    pub resources: BTreeMap<Category, CategoryResultDto>,
}
