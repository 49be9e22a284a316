//! Application state shared across all request handlers.
//!
//! The state holds the caching layer's long-lived components. Every store and
//! service is constructed once during startup and passed to handlers by handle,
//! so tests can build an isolated state per case.

use serenity::http::Http;
use std::sync::Arc;

use super::{middleware::session::SessionGate, service::aggregator::Aggregator};

/// Application state containing shared resources and dependencies.
///
/// All fields are reference counted and cheap to clone for each request via
/// Axum's state extraction.
#[derive(Clone)]
pub struct AppState {
    /// Cache-first resolver for guild resources.
    ///
    /// Owns the process-wide resource store and the per-category fetchers.
    pub aggregator: Arc<Aggregator>,

    /// Credential validation with its short-lived session cache.
    pub session_gate: Arc<SessionGate>,

    /// Discord HTTP client for bot write operations.
    ///
    /// Used to create channels and roles on behalf of dashboard users.
    pub discord_http: Arc<Http>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `aggregator` - Guild resource aggregator
    /// - `session_gate` - Session validation gate
    /// - `discord_http` - Discord HTTP client for bot operations
    pub fn new(
        aggregator: Arc<Aggregator>,
        session_gate: Arc<SessionGate>,
        discord_http: Arc<Http>,
    ) -> Self {
        Self {
            aggregator,
            session_gate,
            discord_http,
        }
    }
}
