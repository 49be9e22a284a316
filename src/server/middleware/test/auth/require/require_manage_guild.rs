use super::*;

/// Tests a user allowed to manage the guild.
///
/// Expected: Ok(Principal)
#[tokio::test]
async fn allows_guild_manager() {
    let validator = StubValidator::new(TOKEN, &[grant(1, true)]);
    let gate = gate(&validator);
    let headers = bearer(TOKEN);

    let result = AuthGuard::new(&gate, &headers)
        .require(&[Permission::ManageGuild(1)])
        .await;

    assert!(result.is_ok());
}

/// Tests a plain member asking to manage the guild.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_plain_member() {
    let validator = StubValidator::new(TOKEN, &[grant(1, false)]);
    let gate = gate(&validator);
    let headers = bearer(TOKEN);

    let result = AuthGuard::new(&gate, &headers)
        .require(&[Permission::ManageGuild(1)])
        .await;

    assert_denied(result);
}

/// Tests managing a guild the user is not in at all.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_non_member() {
    let validator = StubValidator::new(TOKEN, &[grant(1, true)]);
    let gate = gate(&validator);
    let headers = bearer(TOKEN);

    let result = AuthGuard::new(&gate, &headers)
        .require(&[Permission::ManageGuild(2)])
        .await;

    assert_denied(result);
}
