//! Server error hierarchy and its mapping onto HTTP responses.
//!
//! Handlers return `AppError`. Domain errors (`FetchError`, `AuthError`,
//! `ConfigError`) convert into it with `?`, and its `IntoResponse` impl picks the
//! status code and the `ErrorDto` body. Anything the caller cannot act on is
//! logged here and answered with a generic 500.

pub mod auth;
pub mod config;
pub mod fetch;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, fetch::FetchError},
};

#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or missing configuration at startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Missing or rejected session credential (401) or missing guild permission (403).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// A category could not be resolved and no stale entry was available.
    #[error(transparent)]
    FetchErr(#[from] FetchError),

    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Bot write rejected by Discord. Boxed, serenity's error type is large.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed request; the message is returned to the caller as-is.
    #[error("{0}")]
    BadRequest(String),

    /// Logged server-side; the caller only sees a generic message.
    #[error("{0}")]
    InternalError(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Status chosen for a fetch failure that reaches the caller.
///
/// # Returns
/// - 404 Not Found - The guild does not exist upstream
/// - 429 Too Many Requests - Rate limited with nothing cached
/// - 504 Gateway Timeout - Upstream too slow with nothing cached
/// - 502 Bad Gateway - Any other upstream, transport or decode failure
fn fetch_status(err: &FetchError) -> StatusCode {
    match err {
        FetchError::NotFound => StatusCode::NOT_FOUND,
        FetchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        FetchError::Upstream { status: 429 } => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::FetchErr(err) => {
                tracing::debug!("Upstream fetch failed: {}", err);
                error_body(fetch_status(&err), err.to_string())
            }
            Self::DiscordErr(err) => {
                tracing::error!("Discord API error: {}", err);
                error_body(StatusCode::BAD_GATEWAY, "Discord request failed")
            }
            Self::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Logs any displayable error and answers 500 without leaking its details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);
        error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
