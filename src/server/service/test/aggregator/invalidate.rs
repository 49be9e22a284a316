use super::*;

/// Tests invalidating one category after a mutation.
///
/// Expected: the next resolve refetches that category only
#[tokio::test(start_paused = true)]
async fn invalidate_forces_refetch() {
    let channels = StubFetcher::ok(Category::Channels);
    let roles = StubFetcher::ok(Category::Roles);
    let aggregator = aggregator(&[channels.clone(), roles.clone()]);
    let requested = categories(&[Category::Channels, Category::Roles]);

    aggregator.resolve(GUILD_ID, &requested).await;
    aggregator.invalidate(Category::Channels, GUILD_ID);
    aggregator.resolve(GUILD_ID, &requested).await;

    assert_eq!(channels.calls(), 2);
    assert_eq!(roles.calls(), 1);
}

/// Tests dropping every cached category of one guild.
///
/// Expected: all entries of the guild removed, other guilds untouched
#[tokio::test(start_paused = true)]
async fn invalidate_guild_drops_all_categories() {
    let channels = StubFetcher::ok(Category::Channels);
    let roles = StubFetcher::ok(Category::Roles);
    let aggregator = aggregator(&[channels.clone(), roles.clone()]);
    let requested = categories(&[Category::Channels, Category::Roles]);

    aggregator.resolve(GUILD_ID, &requested).await;
    aggregator.resolve(GUILD_ID + 1, &requested).await;

    assert_eq!(aggregator.invalidate_guild(GUILD_ID), 2);
    assert_eq!(aggregator.store().len(), 2);

    aggregator.resolve(GUILD_ID, &requested).await;
    assert_eq!(channels.calls(), 3);
    assert_eq!(roles.calls(), 3);
}

/// Tests invalidating an entry that was never cached.
///
/// Expected: no effect, nothing removed
#[tokio::test(start_paused = true)]
async fn invalidate_missing_entry_is_noop() {
    let aggregator = aggregator(&[StubFetcher::ok(Category::Channels)]);

    aggregator.invalidate(Category::Channels, GUILD_ID);

    assert_eq!(aggregator.invalidate_guild(GUILD_ID), 0);
    assert!(aggregator.store().is_empty());
}
