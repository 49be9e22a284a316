//! Caller-side access to the guildboard API.
//!
//! `api` holds the HTTP transport, `cache` keeps a short-lived local copy of guild
//! resources so that views rendered close together share one round trip.

pub mod api;
pub mod cache;
pub mod model;

pub use cache::ClientCache;
