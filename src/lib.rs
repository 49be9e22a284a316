//! Guildboard: resilient caching and aggregation of Discord guild metadata.
//!
//! The server side resolves guild channels, roles, members and the guild entity
//! through a process-local TTL cache, fanning out upstream fetches for misses and
//! falling back to stale entries when Discord is slow, rate limited or down. The
//! client side mirrors the cache to deduplicate calls made by dashboard views.

pub mod cache;
pub mod model;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "server")]
pub mod server;
