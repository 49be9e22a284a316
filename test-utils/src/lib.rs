//! Guildboard Test Utils
//!
//! Provides shared testing utilities for exercising guildboard against a mocked
//! Discord REST API. This crate offers a builder pattern for creating test contexts
//! backed by a `wiremock` server that serves one guild's resources.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **fixture**: JSON records shaped like Discord's API responses
//! - **TestBuilder**: Fluent builder for configuring the mocked guild
//! - **TestContext**: Running mock server plus the identifiers used to reach it
//! - **TestError**: Error types that can occur while inspecting a test context
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{
//!     builder::{Resource, TestBuilder},
//!     error::TestError,
//!     fixture,
//! };
//!
//! #[tokio::test]
//! async fn fetches_channels() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_channel(fixture::channel::text(10, "general", 0))
//!         .build()
//!         .await;
//!
//!     let api = DiscordApi::new(reqwest::Client::new(), &test.api_base(), test.bot_token());
//!     // Perform fetches...
//!
//!     assert_eq!(test.request_count(Resource::Channels).await?, 1);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
