//! Server-side API backend and caching layer.
//!
//! This module contains the HTTP surface and the caching and aggregation layer
//! that sits between dashboard clients and the Discord REST API.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Aggregation, upstream fetchers, session validation
//!   and bot mutations
//! - **Model Layer** (`model/`) - Upstream Discord records and the authenticated principal
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session gate and request authentication guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (aggregator, session gate, bot HTTP)
//! - **Startup** (`startup`) - Construction of stores, fetchers and the sweeper
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Periodic cache sweep
//!
//! # Request Flow
//!
//! 1. **Router** receives the request and routes it to a controller
//! 2. **AuthGuard** resolves the credential through the session gate
//! 3. **Aggregator** answers each category from the resource store or fans out fetchers
//! 4. **Fetchers** perform one bounded upstream call per missing category
//! 5. **Aggregator** writes successes back, falls back to stale entries on failure
//! 6. **Controller** converts the results to DTOs with freshness-aware cache headers
//!
//! # Feature Gates
//!
//! This module is only available with the `server` feature flag enabled.

pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
