use crate::{
    cache::{CacheKey, Category, ReadMode, TtlPolicy, TtlStore},
    model::discord::CreateNamedDto,
    server::{
        controller::{
            channel::{create_guild_channel, create_guild_role},
            guild::{
                get_guild_channels, get_guild_members, get_guild_resources,
                invalidate_guild_cache, ResourceQuery, CACHE_STATUS_HEADER,
            },
            session::logout,
        },
        error::{fetch::FetchError, AppError},
        middleware::session::SessionGate,
        service::{
            aggregator::Aggregator,
            discord::ResourceFetcher,
            test::{
                fetcher::StubFetcher,
                session::{grant, StubValidator},
            },
        },
        state::AppState,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serenity::http::Http;
use std::{sync::Arc, time::Duration};


const TOKEN: &str = "user-token";

/// Guild the stub user belongs to without management rights.
const MEMBER_GUILD: u64 = 1;
/// Guild the stub user can manage.
const MANAGED_GUILD: u64 = 2;
/// Guild the stub user is not in.
const FOREIGN_GUILD: u64 = 3;

/// Handler state with stub session validation and the given fetchers.
///
/// The bot client points at Discord but is never reached by these tests.
fn state(validator: &Arc<StubValidator>, fetchers: &[Arc<StubFetcher>]) -> AppState {
    let store = Arc::new(TtlStore::new("resource", TtlPolicy::default()));
    let fetchers = fetchers
        .iter()
        .map(|fetcher| Arc::clone(fetcher) as Arc<dyn ResourceFetcher>);
    let aggregator = Arc::new(Aggregator::new(store, fetchers));

    let gate = Arc::new(SessionGate::new(
        Arc::new(TtlStore::new("session", TtlPolicy::default())),
        Arc::new(TtlStore::new("guild grant", TtlPolicy::default())),
        validator.clone(),
    ));

    AppState::new(aggregator, gate, Arc::new(Http::new("bot-token")))
}

fn validator() -> Arc<StubValidator> {
    StubValidator::new(TOKEN, &[grant(MEMBER_GUILD, false), grant(MANAGED_GUILD, true)])
}

fn bearer() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {}", TOKEN)).unwrap();
    headers.insert(header::AUTHORIZATION, value);
    headers
}

/// Converts a handler result into the response axum would send.
fn respond<T: IntoResponse>(result: Result<T, AppError>) -> Response {
    match result {
        Ok(response) => response.into_response(),
        Err(err) => err.into_response(),
    }
}

fn header_value<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Waits past the default resource TTL.
async fn expire() {
    tokio::time::advance(Category::Channels.default_ttl() + Duration::from_secs(1)).await;
}
