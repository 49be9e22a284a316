mod aggregator;
pub(crate) mod fetcher;
