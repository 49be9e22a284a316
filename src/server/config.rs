use std::{net::SocketAddr, time::Duration};

use crate::{
    cache::{Category, TtlPolicy},
    server::error::{config::ConfigError, AppError},
};

const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
const DEFAULT_STALE_GRACE_SECS: u64 = 600;

/// Fixed upper bound for a single fetch of each resource category.
///
/// Members carry the largest payload and get the widest bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimeouts {
    pub channels: Duration,
    pub roles: Duration,
    pub members: Duration,
    pub guild: Duration,
}

impl FetchTimeouts {
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            channels: timeout,
            roles: timeout,
            members: timeout,
            guild: timeout,
        }
    }
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        Self {
            channels: Duration::from_secs(5),
            roles: Duration::from_secs(5),
            members: Duration::from_secs(8),
            guild: Duration::from_secs(5),
        }
    }
}

pub struct Config {
    pub discord_bot_token: String,
    pub discord_api_base: String,

    pub bind_addr: SocketAddr,
    pub cors_origin: Option<String>,

    pub ttl_policy: TtlPolicy,
    pub sweep_interval: Duration,
    /// How long past its TTL a resource entry stays available as a stale fallback.
    pub stale_grace: Duration,
    pub fetch_timeouts: FetchTimeouts,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let discord_api_base = optional_var("DISCORD_API_BASE")
            .unwrap_or_else(|| DEFAULT_DISCORD_API_BASE.to_string());
        url::Url::parse(&discord_api_base).map_err(|e| ConfigError::InvalidEnvVar {
            name: "DISCORD_API_BASE".to_string(),
            reason: e.to_string(),
        })?;

        let bind_addr = optional_var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        let ttl_policy = TtlPolicy {
            channels: ttl_var("CACHE_TTL_CHANNELS", Category::Channels)?,
            roles: ttl_var("CACHE_TTL_ROLES", Category::Roles)?,
            members: ttl_var("CACHE_TTL_MEMBERS", Category::Members)?,
            guild: ttl_var("CACHE_TTL_GUILD", Category::Guild)?,
            session: ttl_var("CACHE_TTL_SESSION", Category::Session)?,
        };

        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            discord_api_base: discord_api_base.trim_end_matches('/').to_string(),
            bind_addr,
            cors_origin: optional_var("CORS_ORIGIN"),
            ttl_policy,
            sweep_interval: sweep_interval(optional_var("CACHE_SWEEP_INTERVAL"))?,
            stale_grace: Duration::from_secs(secs_var(
                "CACHE_STALE_GRACE",
                DEFAULT_STALE_GRACE_SECS,
            )?),
            fetch_timeouts: FetchTimeouts::default(),
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn secs_var(name: &str, default: u64) -> Result<u64, ConfigError> {
    parse_secs(name, optional_var(name), default)
}

fn parse_secs(name: &str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };

    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn ttl_var(name: &str, category: Category) -> Result<Duration, ConfigError> {
    let default = category.default_ttl().as_secs();
    Ok(Duration::from_secs(secs_var(name, default)?))
}

/// Parses `CACHE_SWEEP_INTERVAL`.
///
/// # Returns
/// - `Ok(Duration)` - The configured interval, or 60 seconds when unset
/// - `Err(ConfigError::InvalidEnvVar)` - Not a number, or below one second
fn sweep_interval(raw: Option<String>) -> Result<Duration, ConfigError> {
    let secs = parse_secs("CACHE_SWEEP_INTERVAL", raw, DEFAULT_SWEEP_INTERVAL_SECS)?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            name: "CACHE_SWEEP_INTERVAL".to_string(),
            reason: "must be at least 1 second".to_string(),
        });
    }

    Ok(Duration::from_secs(secs))
}
