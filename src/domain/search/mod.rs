//! Free-text search over the embedded catalog snapshot.

pub mod matcher;
pub mod snapshot;

pub use matcher::{search, title_matches};
pub use snapshot::Catalog;
