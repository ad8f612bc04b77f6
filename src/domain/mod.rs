//! Storefront domain: products, search, static generation and page models.

pub mod error;
pub mod product;
pub mod search;
pub mod storefront;
