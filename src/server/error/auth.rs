use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// No credential was supplied, or the supplied credential was rejected.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Request is not authenticated")]
    Unauthorized,

    /// The session validator could not complete validation.
    ///
    /// Only produced by validators; the session gate reports it to callers as
    /// `Unauthorized` so that a validator outage never surfaces as a server error.
    #[error("Failed to validate session: {0}")]
    Validation(String),

    /// The authenticated user lacks the guild permission the route requires.
    ///
    /// Carries the user ID and a log-only reason. Results in a 403 Forbidden
    /// response.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(u64, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Details are only logged at debug level; the caller sees a generic message.
///
/// # Returns
/// - 401 Unauthorized - `Unauthorized` and `Validation`
/// - 403 Forbidden - `AccessDenied`
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Self::Validation(reason) => {
                tracing::debug!("Session validation failed: {}", reason);
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            Self::AccessDenied(user_id, reason) => {
                tracing::debug!("Access denied for user {}: {}", user_id, reason);
                (StatusCode::FORBIDDEN, "Forbidden")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
