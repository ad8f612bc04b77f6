pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::storefront_service::StorefrontService;
pub use domain::error::CatalogError;
pub use domain::product::Product;
pub use domain::search::{search, Catalog};
pub use domain::storefront::{BuildTarget, PageMetadata, ProductPage, RenderMode, StaticPageSet};
pub use infra::catalog::CatalogClient;
pub use infra::config::StorefrontConfig;
pub use storage::cache::{CachePolicy, CatalogCache, Clock, RequestKey, SystemClock};

// Test support for driving cache expiry from integration tests.
pub use storage::cache::ManualClock;
