pub mod page;
pub mod static_pages;

pub use page::{compose_title, Installments, PageMetadata, ProductPage, RenderMode, SIZES};
pub use static_pages::{build_targets_from, BuildTarget, StaticPageSet};
