use super::*;

/// Tests a member of the requested guild.
///
/// Expected: Ok(Principal)
#[tokio::test]
async fn allows_guild_member() {
    let validator = StubValidator::new(TOKEN, &[grant(1, false), grant(2, false)]);
    let gate = gate(&validator);
    let headers = bearer(TOKEN);

    let result = AuthGuard::new(&gate, &headers)
        .require(&[Permission::Member(2)])
        .await;

    assert!(result.is_ok());
}

/// Tests a logged-in user asking for a guild they are not in.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_non_member() {
    let validator = StubValidator::new(TOKEN, &[grant(1, true)]);
    let gate = gate(&validator);
    let headers = bearer(TOKEN);

    let result = AuthGuard::new(&gate, &headers)
        .require(&[Permission::Member(99)])
        .await;

    assert_denied(result);
}
