use crate::{
    cache::{CacheKey, Category, ReadMode, Sweep, TtlPolicy, TtlStore},
    server::{
        error::fetch::FetchError,
        service::{
            aggregator::{Aggregator, Resolution},
            discord::ResourceFetcher,
            test::fetcher::{named_payload, payload, StubFetcher},
        },
    },
};
use std::{collections::BTreeSet, sync::Arc, time::Duration};

mod fallback;
mod invalidate;
mod resolve;

const GUILD_ID: u64 = 1;

fn aggregator(fetchers: &[Arc<StubFetcher>]) -> Aggregator {
    aggregator_with_grace(fetchers, Duration::ZERO)
}

fn aggregator_with_grace(fetchers: &[Arc<StubFetcher>], grace: Duration) -> Aggregator {
    let store = Arc::new(TtlStore::new("resources", TtlPolicy::default()).with_stale_grace(grace));
    let fetchers = fetchers
        .iter()
        .map(|fetcher| Arc::clone(fetcher) as Arc<dyn ResourceFetcher>);

    Aggregator::new(store, fetchers)
}

fn categories(categories: &[Category]) -> BTreeSet<Category> {
    categories.iter().copied().collect()
}

/// Waits past the default resource TTL.
async fn expire() {
    tokio::time::advance(Category::Channels.default_ttl() + Duration::from_secs(1)).await;
}
