use super::*;

/// Tests a cold cache request for channels and roles.
///
/// Expected: one fetch per category, both Fresh
#[tokio::test(start_paused = true)]
async fn cold_cache_fetches_each_category_once() {
    let channels = StubFetcher::ok(Category::Channels);
    let roles = StubFetcher::ok(Category::Roles);
    let aggregator = aggregator(&[channels.clone(), roles.clone()]);

    let resolved = aggregator
        .resolve(GUILD_ID, &categories(&[Category::Channels, Category::Roles]))
        .await;

    assert_eq!(resolved.len(), 2);
    assert!(resolved.values().all(Resolution::is_fresh));
    assert_eq!(channels.calls(), 1);
    assert_eq!(roles.calls(), 1);
}

/// Tests that a repeated request within the TTL is served from the store.
///
/// Expected: no additional fetches, identical payloads
#[tokio::test(start_paused = true)]
async fn repeated_request_hits_cache() {
    let channels = StubFetcher::ok(Category::Channels);
    let roles = StubFetcher::ok(Category::Roles);
    let aggregator = aggregator(&[channels.clone(), roles.clone()]);
    let requested = categories(&[Category::Channels, Category::Roles]);

    let first = aggregator.resolve(GUILD_ID, &requested).await;
    tokio::time::advance(Duration::from_secs(10)).await;
    let second = aggregator.resolve(GUILD_ID, &requested).await;

    assert_eq!(first, second);
    assert_eq!(channels.calls(), 1);
    assert_eq!(roles.calls(), 1);
}

/// Tests a request mixing a warm and a cold category.
///
/// Expected: only the cold category is fetched
#[tokio::test(start_paused = true)]
async fn warm_mixed_request_fetches_only_misses() {
    let channels = StubFetcher::ok(Category::Channels);
    let roles = StubFetcher::ok(Category::Roles);
    let aggregator = aggregator(&[channels.clone(), roles.clone()]);

    aggregator.resolve_one(GUILD_ID, Category::Channels).await;
    let resolved = aggregator
        .resolve(GUILD_ID, &categories(&[Category::Channels, Category::Roles]))
        .await;

    assert!(resolved.values().all(Resolution::is_fresh));
    assert_eq!(channels.calls(), 1);
    assert_eq!(roles.calls(), 1);
}

/// Tests that one failing category does not affect the others.
///
/// Expected: channels Fresh, members Failed with the upstream error
#[tokio::test(start_paused = true)]
async fn partial_failure_is_isolated() {
    let channels = StubFetcher::ok(Category::Channels);
    let members = StubFetcher::failing(Category::Members, FetchError::Upstream { status: 503 });
    let aggregator = aggregator(&[channels.clone(), members.clone()]);

    let resolved = aggregator
        .resolve(GUILD_ID, &categories(&[Category::Channels, Category::Members]))
        .await;

    assert!(resolved[&Category::Channels].is_fresh());
    assert_eq!(
        resolved[&Category::Members],
        Resolution::Failed(FetchError::Upstream { status: 503 })
    );
    assert!(aggregator
        .store()
        .get(&CacheKey::guild(Category::Members, GUILD_ID), ReadMode::AllowStale)
        .is_none());
}

/// Tests that resolve waits for every launched fetch.
///
/// Verifies that a fast category is not returned ahead of a slow one and that the
/// slow result is present in the same response.
///
/// Expected: both categories resolved after the slow fetch completes
#[tokio::test(start_paused = true)]
async fn waits_for_all_fetches() {
    let channels = StubFetcher::ok(Category::Channels);
    let members = StubFetcher::slow(Category::Members, Duration::from_secs(3));
    let aggregator = aggregator(&[channels.clone(), members.clone()]);

    let started = tokio::time::Instant::now();
    let resolved = aggregator
        .resolve(GUILD_ID, &categories(&[Category::Channels, Category::Members]))
        .await;

    assert!(started.elapsed() >= Duration::from_secs(3));
    assert!(resolved[&Category::Channels].is_fresh());
    assert!(resolved[&Category::Members].is_fresh());
}

/// Tests that fetches for different categories run concurrently.
///
/// Expected: total latency equals the slowest fetch, not the sum
#[tokio::test(start_paused = true)]
async fn fetches_run_concurrently() {
    let channels = StubFetcher::slow(Category::Channels, Duration::from_secs(2));
    let roles = StubFetcher::slow(Category::Roles, Duration::from_secs(2));
    let aggregator = aggregator(&[channels.clone(), roles.clone()]);

    let started = tokio::time::Instant::now();
    aggregator
        .resolve(GUILD_ID, &categories(&[Category::Channels, Category::Roles]))
        .await;

    assert!(started.elapsed() < Duration::from_secs(4));
}

/// Tests requests for categories without a registered fetcher.
///
/// Expected: the category is absent from the result, others still resolved
#[tokio::test(start_paused = true)]
async fn skips_categories_without_fetcher() {
    let channels = StubFetcher::ok(Category::Channels);
    let aggregator = aggregator(&[channels.clone()]);

    let resolved = aggregator
        .resolve(GUILD_ID, &categories(&[Category::Channels, Category::Session]))
        .await;

    assert_eq!(resolved.len(), 1);
    assert!(resolved.contains_key(&Category::Channels));
    assert_eq!(aggregator.resolve_one(GUILD_ID, Category::Roles).await, None);
}

/// Tests a fetch task that panics.
///
/// Expected: the category settles as a transport failure
#[tokio::test(start_paused = true)]
async fn panicked_fetch_settles_as_failure() {
    let roles = StubFetcher::panicking(Category::Roles);
    let aggregator = aggregator(&[roles.clone()]);

    let resolved = aggregator.resolve_one(GUILD_ID, Category::Roles).await;

    assert_eq!(
        resolved,
        Some(Resolution::Failed(FetchError::Transport(
            "fetch task aborted".to_string()
        )))
    );
}

/// Tests that guilds are cached independently.
///
/// Expected: a second guild triggers its own fetch
#[tokio::test(start_paused = true)]
async fn guilds_are_cached_separately() {
    let channels = StubFetcher::ok(Category::Channels);
    let aggregator = aggregator(&[channels.clone()]);

    aggregator.resolve_one(GUILD_ID, Category::Channels).await;
    aggregator.resolve_one(GUILD_ID + 1, Category::Channels).await;

    assert_eq!(channels.calls(), 2);
}
