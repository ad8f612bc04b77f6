pub mod router;
pub mod types;
pub mod handlers {
    pub mod build;
    pub mod common;
    pub mod health;
    pub mod product;
    pub mod search;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
