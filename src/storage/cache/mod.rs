//! Process-wide catalog response cache.

pub mod clock;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CachePolicy, CachedResponse, CatalogCache, RequestKey};
