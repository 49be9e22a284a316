use serde_json::{json, Value};
use std::{collections::HashMap, time::Duration};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::context::TestContext;

/// Guild resource endpoints served by the mock server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Channels,
    Roles,
    Members,
    Guild,
}

impl Resource {
    /// Request path of the endpoint for `guild_id`, without query string.
    pub fn path(self, guild_id: u64) -> String {
        match self {
            Resource::Channels => format!("/guilds/{}/channels", guild_id),
            Resource::Roles => format!("/guilds/{}/roles", guild_id),
            Resource::Members => format!("/guilds/{}/members", guild_id),
            Resource::Guild => format!("/guilds/{}", guild_id),
        }
    }
}

/// Builder for creating test contexts with a mocked Discord guild.
///
/// Provides a fluent interface for describing one guild's channels, roles, members
/// and guild record, plus failures and latency per endpoint. Call `build()` to start
/// the mock server with every endpoint mounted.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::{Resource, TestBuilder}, fixture};
///
/// let test = TestBuilder::new()
///     .with_channel(fixture::channel::text(10, "general", 0))
///     .with_failure(Resource::Members, 503)
///     .build()
///     .await;
/// ```
pub struct TestBuilder {
    guild_id: u64,
    bot_token: String,
    channels: Vec<Value>,
    roles: Vec<Value>,
    members: Vec<Value>,
    guild: Option<Value>,
    failures: HashMap<Resource, u16>,
    delays: HashMap<Resource, Duration>,
}

impl TestBuilder {
    /// Creates a builder for guild 1 with no resources and bot token `test-token`.
    ///
    /// # Returns
    /// - New `TestBuilder` instance serving empty lists and no guild record
    pub fn new() -> Self {
        Self {
            guild_id: 1,
            bot_token: "test-token".to_string(),
            channels: Vec::new(),
            roles: Vec::new(),
            members: Vec::new(),
            guild: None,
            failures: HashMap::new(),
            delays: HashMap::new(),
        }
    }

    pub fn with_guild_id(mut self, guild_id: u64) -> Self {
        self.guild_id = guild_id;
        self
    }

    pub fn with_bot_token(mut self, bot_token: &str) -> Self {
        self.bot_token = bot_token.to_string();
        self
    }

    pub fn with_channel(mut self, channel: Value) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn with_role(mut self, role: Value) -> Self {
        self.roles.push(role);
        self
    }

    pub fn with_member(mut self, member: Value) -> Self {
        self.members.push(member);
        self
    }

    /// Sets the guild record. Without one the guild endpoint answers 404.
    pub fn with_guild(mut self, guild: Value) -> Self {
        self.guild = Some(guild);
        self
    }

    /// Makes `resource` answer with `status` and a Discord-style error body.
    ///
    /// # Arguments
    /// - `resource` - Endpoint to fail
    /// - `status` - HTTP status to respond with
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_failure(mut self, resource: Resource, status: u16) -> Self {
        self.failures.insert(resource, status);
        self
    }

    /// Delays every response of `resource` by `delay`.
    pub fn with_delay(mut self, resource: Resource, delay: Duration) -> Self {
        self.delays.insert(resource, delay);
        self
    }

    /// Starts the mock server and mounts every guild endpoint.
    ///
    /// Endpoints only match requests carrying `Authorization: Bot <token>`; any other
    /// request falls through to the server's default 404.
    ///
    /// # Returns
    /// - `TestContext` - Running mock server with the configured guild
    pub async fn build(self) -> TestContext {
        let server = MockServer::start().await;
        let authorization = format!("Bot {}", self.bot_token);

        let not_found = json!({ "message": "Unknown Guild", "code": 10004 });
        let bodies = [
            (Resource::Channels, Some(Value::Array(self.channels))),
            (Resource::Roles, Some(Value::Array(self.roles))),
            (Resource::Members, Some(Value::Array(self.members))),
            (Resource::Guild, self.guild),
        ];

        for (resource, body) in bodies {
            let mut response = match (self.failures.get(&resource), body) {
                (Some(status), _) => ResponseTemplate::new(*status)
                    .set_body_json(json!({ "message": "Mocked failure", "code": 0 })),
                (None, Some(body)) => ResponseTemplate::new(200).set_body_json(body),
                (None, None) => ResponseTemplate::new(404).set_body_json(not_found.clone()),
            };

            if let Some(delay) = self.delays.get(&resource) {
                response = response.set_delay(*delay);
            }

            Mock::given(method("GET"))
                .and(path(resource.path(self.guild_id)))
                .and(header("authorization", authorization.as_str()))
                .respond_with(response)
                .mount(&server)
                .await;
        }

        TestContext::new(server, self.guild_id, self.bot_token)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
