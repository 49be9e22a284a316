use crate::{
    cache::{TtlPolicy, TtlStore},
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::{AuthGuard, Permission},
            session::SessionGate,
        },
        service::test::session::{grant, StubValidator, USER_ID},
    },
};
use axum::http::{header, HeaderMap, HeaderValue};
use std::sync::Arc;

mod require;

const TOKEN: &str = "user-token";

fn gate(validator: &Arc<StubValidator>) -> SessionGate {
    SessionGate::new(
        Arc::new(TtlStore::new("session", TtlPolicy::default())),
        Arc::new(TtlStore::new("guild grants", TtlPolicy::default())),
        validator.clone(),
    )
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {}", token)).unwrap();
    headers.insert(header::AUTHORIZATION, value);
    headers
}

/// Asserts that `result` is an access denial for the stub user.
fn assert_denied<T: std::fmt::Debug>(result: Result<T, AppError>) {
    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, _))) => {
            assert_eq!(user_id, USER_ID)
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }
}
