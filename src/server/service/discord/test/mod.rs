use crate::{
    cache::Category,
    model::resource::ResourcePayload,
    server::{
        error::fetch::FetchError,
        service::discord::{
            ChannelFetcher, DiscordApi, DiscordMutationService, GuildFetcher, MemberFetcher,
            ResourceFetcher, RoleFetcher,
        },
    },
};
use std::time::Duration;
use test_utils::{
    builder::{Resource, TestBuilder},
    context::TestContext,
    fixture,
};


/// Bound used by fetchers under test; far above mock server latency.
const TIMEOUT: Duration = Duration::from_secs(5);

/// Creates an API wrapper pointed at the mock server with the matching bot token.
fn api_for(test: &TestContext) -> DiscordApi {
    DiscordApi::new(reqwest::Client::new(), &test.api_base(), test.bot_token())
}
