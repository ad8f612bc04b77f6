//! Outbound access to the remote catalog service.

pub mod client;

pub use client::CatalogClient;
