use super::*;

mod require_manage_guild;
mod require_member;

/// Tests a request without any credential.
///
/// Expected: Err(AuthError::Unauthorized) without asking the validator
#[tokio::test]
async fn rejects_missing_credential() {
    let validator = StubValidator::new(TOKEN, &[grant(1, true)]);
    let gate = gate(&validator);
    let headers = HeaderMap::new();

    let result = AuthGuard::new(&gate, &headers)
        .require(&[Permission::Member(1)])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::Unauthorized))
    ));
    assert_eq!(validator.validations(), 0);
    assert_eq!(validator.guild_listings(), 0);
}

/// Tests that no permissions only requires a valid login.
///
/// Expected: Ok(Principal) without a guild listing
#[tokio::test]
async fn empty_permissions_only_authenticate() {
    let validator = StubValidator::new(TOKEN, &[]);
    let gate = gate(&validator);
    let headers = bearer(TOKEN);

    let principal = AuthGuard::new(&gate, &headers).require(&[]).await.unwrap();

    assert_eq!(principal.user_id, USER_ID);
    assert_eq!(validator.guild_listings(), 0);
}

/// Tests that every listed permission is checked.
///
/// Verifies that membership alone does not satisfy a later manage requirement
/// in the same call.
///
/// Expected: Err(AuthError::AccessDenied) for the first failed permission
#[tokio::test]
async fn requires_all_permissions() {
    let validator = StubValidator::new(TOKEN, &[grant(1, false)]);
    let gate = gate(&validator);
    let headers = bearer(TOKEN);
    let guard = AuthGuard::new(&gate, &headers);

    assert!(guard.require(&[Permission::Member(1)]).await.is_ok());
    assert_denied(
        guard
            .require(&[Permission::Member(1), Permission::ManageGuild(1)])
            .await,
    );
    assert_eq!(validator.guild_listings(), 1);
}
