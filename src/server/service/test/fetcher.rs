//! Scripted resource fetcher shared by the aggregator and controller tests.

use parking_lot::Mutex;
use serenity::async_trait;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::{
    cache::Category,
    model::{
        discord::{DiscordChannelDto, DiscordMemberDto, DiscordRoleDto},
        resource::ResourcePayload,
    },
    server::{error::fetch::FetchError, service::discord::ResourceFetcher},
};

/// Scripted fetcher counting its calls.
pub struct StubFetcher {
    category: Category,
    calls: AtomicUsize,
    outcome: Mutex<Result<ResourcePayload, FetchError>>,
    delay: Duration,
    panics: bool,
}

impl StubFetcher {
    pub fn ok(category: Category) -> Arc<Self> {
        Self::build(category, Ok(payload(category)), Duration::ZERO)
    }

    pub fn failing(category: Category, err: FetchError) -> Arc<Self> {
        Self::build(category, Err(err), Duration::ZERO)
    }

    pub fn slow(category: Category, delay: Duration) -> Arc<Self> {
        Self::build(category, Ok(payload(category)), delay)
    }

    pub fn panicking(category: Category) -> Arc<Self> {
        Arc::new(Self {
            panics: true,
            ..Self::unshared(category, Ok(payload(category)), Duration::ZERO)
        })
    }

    fn build(
        category: Category,
        outcome: Result<ResourcePayload, FetchError>,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self::unshared(category, outcome, delay))
    }

    fn unshared(
        category: Category,
        outcome: Result<ResourcePayload, FetchError>,
        delay: Duration,
    ) -> Self {
        Self {
            category,
            calls: AtomicUsize::new(0),
            outcome: Mutex::new(outcome),
            delay,
            panics: false,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_outcome(&self, outcome: Result<ResourcePayload, FetchError>) {
        *self.outcome.lock() = outcome;
    }
}

#[async_trait]
impl ResourceFetcher for StubFetcher {
    fn category(&self) -> Category {
        self.category
    }

    async fn fetch(&self, _guild_id: u64) -> Result<ResourcePayload, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.panics {
            panic!("stub fetcher panicked");
        }

        self.outcome.lock().clone()
    }
}

/// Creates a distinguishable payload for `category`.
pub fn payload(category: Category) -> ResourcePayload {
    named_payload(category, "initial")
}

pub fn named_payload(category: Category, name: &str) -> ResourcePayload {
    match category {
        Category::Roles => ResourcePayload::Roles(Arc::new(vec![DiscordRoleDto {
            id: 20,
            name: name.to_string(),
            color: "#000000".to_string(),
            position: 0,
            managed: false,
        }])),
        Category::Members => ResourcePayload::Members(Arc::new(vec![DiscordMemberDto {
            user_id: 30,
            username: name.to_string(),
            display_name: name.to_string(),
            discriminator: None,
            avatar: None,
            nickname: None,
        }])),
        _ => ResourcePayload::Channels(Arc::new(vec![DiscordChannelDto {
            id: 10,
            name: name.to_string(),
            kind: 0,
            position: 0,
            parent_id: None,
        }])),
    }
}
