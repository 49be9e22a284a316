use serenity::http::Http;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    cache::{Sweep, TtlStore},
    server::{
        config::Config,
        error::{config::ConfigError, AppError},
        middleware::session::SessionGate,
        scheduler::CacheSweeper,
        service::{
            aggregator::Aggregator,
            auth::DiscordSessionValidator,
            discord::{discord_fetchers, DiscordApi},
        },
        state::AppState,
    },
};

/// Builds the reqwest client used for all upstream calls.
///
/// Redirects are disabled so a compromised or misconfigured upstream cannot steer
/// bot-authenticated requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(concat!("guildboard/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}

/// Assembled application: request state plus the sweeper that owns the stores'
/// background eviction.
pub struct Application {
    pub state: AppState,
    pub sweeper: CacheSweeper,
}

/// Constructs the stores, fetchers, session gate and sweeper.
///
/// # Arguments
/// - `config` - Application configuration
///
/// # Returns
/// - `Ok(Application)` - Ready to serve, sweeper already running
/// - `Err(AppError)` - HTTP client or scheduler could not be created
pub async fn build_application(config: &Config) -> Result<Application, AppError> {
    let http_client = setup_reqwest_client()?;

    let resource_store = Arc::new(
        TtlStore::new("resource", config.ttl_policy).with_stale_grace(config.stale_grace),
    );
    let session_store = Arc::new(TtlStore::new("session", config.ttl_policy));
    let grant_store = Arc::new(TtlStore::new("guild grant", config.ttl_policy));

    let api = DiscordApi::new(
        http_client.clone(),
        &config.discord_api_base,
        &config.discord_bot_token,
    );
    let aggregator = Arc::new(Aggregator::new(
        resource_store.clone(),
        discord_fetchers(api, config.fetch_timeouts),
    ));

    let validator = Arc::new(DiscordSessionValidator::new(
        http_client,
        &config.discord_api_base,
    ));
    let session_gate = Arc::new(SessionGate::new(
        session_store.clone(),
        grant_store.clone(),
        validator,
    ));

    let discord_http = Arc::new(Http::new(&config.discord_bot_token));

    let stores: Vec<Arc<dyn Sweep>> = vec![resource_store, session_store, grant_store];
    let sweeper = CacheSweeper::start(stores, config.sweep_interval).await?;

    Ok(Application {
        state: AppState::new(aggregator, session_gate, discord_http),
        sweeper,
    })
}

/// Builds the CORS layer for the dashboard frontend.
///
/// Without a configured origin the API is same-origin only.
pub fn setup_cors(config: &Config) -> Result<Option<CorsLayer>, AppError> {
    let Some(origin) = &config.cors_origin else {
        return Ok(None);
    };

    let origin = origin
        .parse::<axum::http::HeaderValue>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: "CORS_ORIGIN".to_string(),
            reason: e.to_string(),
        })?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
    ))
}
