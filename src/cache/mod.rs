//! In-memory caching primitives shared by the server and the client cache.
//!
//! - `Category` / `TtlPolicy` - closed set of resource types and their TTLs
//! - `CacheKey` / `CacheEntry` - composite keys and timestamped values
//! - `TtlStore` - the keyed store with fresh and stale-allowed reads

pub mod category;
pub mod entry;
pub mod store;

pub use category::{Category, TtlPolicy, UnknownCategory};
pub use entry::{CacheEntry, CacheKey};
pub use store::{CachedValue, ReadMode, Sweep, TtlStore};
