use axum::http::{header, HeaderMap};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::SessionGate,
    model::user::Principal,
};

/// Name of the cookie carrying the session credential.
pub const SESSION_COOKIE: &str = "session";

/// Guild-scoped rights a route can demand of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// The caller belongs to the guild.
    Member(u64),
    /// The caller owns the guild, or holds Administrator or Manage Server in it.
    ManageGuild(u64),
}

/// Per-request authentication and authorization check.
///
/// Pulls the credential from the request headers, resolves it through the
/// session gate, then checks each required permission against the caller's
/// guild grants.
pub struct AuthGuard<'a> {
    gate: &'a SessionGate,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(gate: &'a SessionGate, headers: &'a HeaderMap) -> Self {
        Self { gate, headers }
    }

    /// Requires an authenticated principal holding every listed permission.
    ///
    /// Permissions are checked in order and the first one missing fails the request.
    ///
    /// # Arguments
    /// - `permissions` - Rights the caller must hold; empty for any logged-in user
    ///
    /// # Returns
    /// - `Ok(Principal)` - The request carries a valid credential with every permission
    /// - `Err(AppError::AuthErr(Unauthorized))` - Missing or rejected credential
    /// - `Err(AppError::AuthErr(AccessDenied))` - A permission is not held
    pub async fn require(&self, permissions: &[Permission]) -> Result<Principal, AppError> {
        let credential = credential_from_headers(self.headers);
        let principal = self.gate.authorize(credential.as_deref()).await?;

        for permission in permissions {
            match *permission {
                Permission::Member(guild_id) => {
                    if self.gate.guild_grant(&principal, guild_id).await?.is_none() {
                        return Err(AuthError::AccessDenied(
                            principal.user_id,
                            format!("User is not a member of guild {}", guild_id),
                        )
                        .into());
                    }
                }
                Permission::ManageGuild(guild_id) => {
                    let grant = self.gate.guild_grant(&principal, guild_id).await?;
                    if !grant.is_some_and(|grant| grant.can_manage) {
                        return Err(AuthError::AccessDenied(
                            principal.user_id,
                            format!("User cannot manage guild {}", guild_id),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(principal)
    }
}

/// Extracts the raw credential blob from `Authorization: Bearer <token>`, falling
/// back to the session cookie.
pub fn credential_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());

    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}
