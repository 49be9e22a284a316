use wiremock::MockServer;

use crate::{builder::Resource, error::TestError};

/// Running mock Discord API for one guild.
///
/// The server shuts down when the context is dropped, so keep it alive for the
/// whole test.
pub struct TestContext {
    /// Mock server, exposed for mounting additional endpoints.
    pub server: MockServer,
    guild_id: u64,
    bot_token: String,
}

impl TestContext {
    pub fn new(server: MockServer, guild_id: u64, bot_token: String) -> Self {
        Self {
            server,
            guild_id,
            bot_token,
        }
    }

    /// Base URL to configure as the Discord API base.
    pub fn api_base(&self) -> String {
        self.server.uri()
    }

    pub fn guild_id(&self) -> u64 {
        self.guild_id
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    /// Counts the requests received for `resource`, matched or not.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of requests whose path is the resource's endpoint
    /// - `Err(TestError::RecordingDisabled)` - Server does not record requests
    pub async fn request_count(&self, resource: Resource) -> Result<usize, TestError> {
        let expected = resource.path(self.guild_id);
        let requests = self
            .server
            .received_requests()
            .await
            .ok_or(TestError::RecordingDisabled)?;

        Ok(requests
            .iter()
            .filter(|request| request.url.path() == expected)
            .count())
    }
}
