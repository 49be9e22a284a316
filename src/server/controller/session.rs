use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    model::api::ErrorDto,
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::credential_from_headers,
        state::AppState,
    },
};

/// Tag for grouping session endpoints in OpenAPI documentation
pub static SESSION_TAG: &str = "session";

/// Log out.
///
/// Forgets the cached validation and guild grants of the request's credential,
/// so the next request carrying it is validated upstream again. The credential
/// itself is not revoked at Discord.
///
/// # Returns
/// - `204 No Content` - Cached session state dropped, or nothing was cached
/// - `401 Unauthorized` - The request carries no credential
#[utoipa::path(
    delete,
    path = "/api/session",
    tag = SESSION_TAG,
    responses(
        (status = 204, description = "Session forgotten"),
        (status = 401, description = "No credential supplied", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let Some(credential) = credential_from_headers(&headers).filter(|c| !c.is_empty()) else {
        return Err(AuthError::Unauthorized.into());
    };

    if state.session_gate.revoke(&credential) {
        tracing::debug!("Dropped cached session state on logout");
    }

    Ok(StatusCode::NO_CONTENT)
}
