//! Service layer for the caching and aggregation logic.
//!
//! - **Aggregator** (`aggregator`) - cache-first resolution with fan-out and stale fallback
//! - **Discord** (`discord/`) - per-category upstream fetchers and bot mutations
//! - **Auth** (`auth`) - full session validation behind the session gate

pub mod aggregator;
pub mod auth;
pub mod discord;

#[cfg(test)]
pub(crate) mod test;
