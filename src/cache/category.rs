//! Resource categories and their TTL policy.
//!
//! Every cached value belongs to exactly one `Category`. The category decides the
//! entry's TTL and is half of its `CacheKey`, so two categories never share an
//! expiry or eviction decision even when they are keyed by the same guild.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};

/// A cached resource type.
///
/// `Channels`, `Roles`, `Members` and `Guild` are upstream guild resources that can
/// be requested through the aggregation layer. `Session` only backs the session
/// gate's cache of pre-validated principals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Channels,
    Roles,
    Members,
    Guild,
    Session,
}

impl Category {
    /// Categories that may be requested from the aggregation layer.
    pub const RESOURCES: [Category; 4] = [
        Category::Channels,
        Category::Roles,
        Category::Members,
        Category::Guild,
    ];

    /// Default TTL for the category.
    ///
    /// The guild entity changes rarely so it keeps a longer window; sessions only
    /// guard against repeated validation within a burst of requests.
    pub const fn default_ttl(self) -> Duration {
        match self {
            Category::Channels | Category::Roles | Category::Members => Duration::from_secs(300),
            Category::Guild => Duration::from_secs(1800),
            Category::Session => Duration::from_secs(30),
        }
    }

    pub fn is_resource(self) -> bool {
        !matches!(self, Category::Session)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Channels => "channels",
            Category::Roles => "roles",
            Category::Members => "members",
            Category::Guild => "guild",
            Category::Session => "session",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resource category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parses a requestable resource category. `session` is not requestable and is
    /// rejected like any unknown name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "channels" => Ok(Category::Channels),
            "roles" => Ok(Category::Roles),
            "members" => Ok(Category::Members),
            "guild" => Ok(Category::Guild),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Category to TTL mapping, fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub channels: Duration,
    pub roles: Duration,
    pub members: Duration,
    pub guild: Duration,
    pub session: Duration,
}

impl TtlPolicy {
    /// Policy applying the same TTL to every category.
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            channels: ttl,
            roles: ttl,
            members: ttl,
            guild: ttl,
            session: ttl,
        }
    }

    pub fn ttl(&self, category: Category) -> Duration {
        match category {
            Category::Channels => self.channels,
            Category::Roles => self.roles,
            Category::Members => self.members,
            Category::Guild => self.guild,
            Category::Session => self.session,
        }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            channels: Category::Channels.default_ttl(),
            roles: Category::Roles.default_ttl(),
            members: Category::Members.default_ttl(),
            guild: Category::Guild.default_ttl(),
            session: Category::Session.default_ttl(),
        }
    }
}
