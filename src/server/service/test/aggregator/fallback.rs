use super::*;

/// Tests a timeout on an expired entry.
///
/// Verifies that the previously stored payload is served with its original
/// timestamp and that the cause is reported.
///
/// Expected: Resolution::Stale carrying the old payload and the timeout
#[tokio::test(start_paused = true)]
async fn timeout_serves_stale_entry() {
    let members = StubFetcher::ok(Category::Members);
    let aggregator = aggregator(&[members.clone()]);

    let Some(Resolution::Fresh(original)) =
        aggregator.resolve_one(GUILD_ID, Category::Members).await
    else {
        panic!("expected fresh members");
    };

    expire().await;
    let timeout = FetchError::Timeout(Duration::from_secs(8));
    members.set_outcome(Err(timeout.clone()));

    match aggregator.resolve_one(GUILD_ID, Category::Members).await {
        Some(Resolution::Stale { payload, cause, .. }) => {
            assert_eq!(payload, original);
            assert_eq!(cause, timeout);
        }
        other => panic!("expected stale members, got {:?}", other),
    }
    assert_eq!(members.calls(), 2);
}

/// Tests a rate limited route with an expired entry.
///
/// Expected: Resolution::Stale, no retry of the fetch
#[tokio::test(start_paused = true)]
async fn rate_limit_serves_stale_entry() {
    let roles = StubFetcher::ok(Category::Roles);
    let aggregator = aggregator(&[roles.clone()]);

    aggregator.resolve_one(GUILD_ID, Category::Roles).await;
    expire().await;
    roles.set_outcome(Err(FetchError::Upstream { status: 429 }));

    let resolved = aggregator.resolve_one(GUILD_ID, Category::Roles).await;

    assert!(resolved.is_some_and(|resolution| resolution.is_stale()));
    assert_eq!(roles.calls(), 2);
}

/// Tests a missing guild with an expired entry.
///
/// Expected: Resolution::Failed(NotFound), expired entry not served
#[tokio::test(start_paused = true)]
async fn not_found_never_serves_stale() {
    let channels = StubFetcher::ok(Category::Channels);
    let aggregator = aggregator(&[channels.clone()]);

    aggregator.resolve_one(GUILD_ID, Category::Channels).await;
    expire().await;
    channels.set_outcome(Err(FetchError::NotFound));

    let resolved = aggregator.resolve_one(GUILD_ID, Category::Channels).await;

    assert_eq!(resolved, Some(Resolution::Failed(FetchError::NotFound)));
    assert_eq!(channels.calls(), 2);
}

/// Tests a failure with nothing cached at all.
///
/// Expected: Resolution::Failed with the timeout
#[tokio::test(start_paused = true)]
async fn failure_without_entry_fails() {
    let timeout = FetchError::Timeout(Duration::from_secs(5));
    let channels = StubFetcher::failing(Category::Channels, timeout.clone());
    let aggregator = aggregator(&[channels.clone()]);

    let resolved = aggregator.resolve_one(GUILD_ID, Category::Channels).await;

    assert_eq!(resolved, Some(Resolution::Failed(timeout)));
}

/// Tests recovery after a stale fallback.
///
/// Expected: the next successful fetch replaces the stale entry and is Fresh
#[tokio::test(start_paused = true)]
async fn success_after_stale_refreshes_entry() {
    let channels = StubFetcher::ok(Category::Channels);
    let aggregator = aggregator(&[channels.clone()]);

    aggregator.resolve_one(GUILD_ID, Category::Channels).await;
    expire().await;
    channels.set_outcome(Err(FetchError::Transport("connection reset".to_string())));
    assert!(aggregator
        .resolve_one(GUILD_ID, Category::Channels)
        .await
        .is_some_and(|resolution| resolution.is_stale()));

    let refreshed = named_payload(Category::Channels, "refreshed");
    channels.set_outcome(Ok(refreshed.clone()));

    assert_eq!(
        aggregator.resolve_one(GUILD_ID, Category::Channels).await,
        Some(Resolution::Fresh(refreshed.clone()))
    );
    assert_eq!(
        aggregator.resolve_one(GUILD_ID, Category::Channels).await,
        Some(Resolution::Fresh(refreshed))
    );
    assert_eq!(channels.calls(), 3);
}

/// Tests the wire form of a stale resolution.
///
/// Expected: stale DTO keeps the payload and stored timestamp
#[tokio::test(start_paused = true)]
async fn stale_resolution_converts_to_dto() {
    let roles = StubFetcher::ok(Category::Roles);
    let aggregator = aggregator(&[roles.clone()]);

    aggregator.resolve_one(GUILD_ID, Category::Roles).await;
    let stored_at = aggregator
        .store()
        .get(&CacheKey::guild(Category::Roles, GUILD_ID), ReadMode::Fresh)
        .unwrap()
        .stored_at;

    expire().await;
    roles.set_outcome(Err(FetchError::Upstream { status: 500 }));

    let dto = aggregator
        .resolve_one(GUILD_ID, Category::Roles)
        .await
        .unwrap()
        .into_dto();

    assert!(dto.is_stale());
    assert_eq!(dto.payload(), Some(&payload(Category::Roles)));
    assert!(matches!(
        dto,
        crate::model::resource::CategoryResultDto::Stale { stored_at: at, .. } if at == stored_at
    ));
}

/// Tests that a sweep running between expiry and the failed refresh does not
/// take the fallback away while the entry is within the stale grace.
///
/// Expected: sweep removes nothing, the failed refresh is served stale
#[tokio::test(start_paused = true)]
async fn sweep_within_grace_keeps_stale_fallback() {
    let channels = StubFetcher::ok(Category::Channels);
    let aggregator = aggregator_with_grace(&[channels.clone()], Duration::from_secs(600));

    aggregator.resolve_one(GUILD_ID, Category::Channels).await;
    expire().await;
    assert_eq!(aggregator.store().sweep(), 0);

    channels.set_outcome(Err(FetchError::Upstream { status: 503 }));
    let resolved = aggregator.resolve_one(GUILD_ID, Category::Channels).await;

    assert!(resolved.is_some_and(|resolution| resolution.is_stale()));
}

/// Tests that a sweep past TTL plus grace leaves nothing to fall back on.
///
/// Expected: Resolution::Failed with the upstream error
#[tokio::test(start_paused = true)]
async fn sweep_past_grace_drops_fallback() {
    let channels = StubFetcher::ok(Category::Channels);
    let aggregator = aggregator_with_grace(&[channels.clone()], Duration::from_secs(600));

    aggregator.resolve_one(GUILD_ID, Category::Channels).await;
    expire().await;
    tokio::time::advance(Duration::from_secs(600)).await;
    assert_eq!(aggregator.store().sweep(), 1);

    let failure = FetchError::Upstream { status: 503 };
    channels.set_outcome(Err(failure.clone()));
    let resolved = aggregator.resolve_one(GUILD_ID, Category::Channels).await;

    assert_eq!(resolved, Some(Resolution::Failed(failure)));
}

/// Tests that reading an expired entry for a refresh does not remove it.
///
/// Expected: the expired entry is still in the store after a failed refresh
#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_expired_entry() {
    let roles = StubFetcher::ok(Category::Roles);
    let aggregator = aggregator(&[roles.clone()]);

    aggregator.resolve_one(GUILD_ID, Category::Roles).await;
    expire().await;
    roles.set_outcome(Err(FetchError::Timeout(Duration::from_secs(5))));
    aggregator.resolve_one(GUILD_ID, Category::Roles).await;

    let key = CacheKey::guild(Category::Roles, GUILD_ID);
    assert!(aggregator
        .store()
        .get(&key, ReadMode::AllowStale)
        .is_some_and(|cached| cached.expired));
}
