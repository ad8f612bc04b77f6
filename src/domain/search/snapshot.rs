//! The catalog snapshot compiled into the binary for the search route.

use crate::domain::product::Product;
use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashSet;

const EMBEDDED_CATALOG: &str = include_str!("../../../data/products.json");

#[derive(Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Read-only, in-process product dataset. Never refreshed from upstream.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Loads the snapshot shipped in `data/products.json`.
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(EMBEDDED_CATALOG).context("embedded catalog snapshot is invalid")
    }

    /// Parses a `{ "products": [...] }` document and checks product invariants.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::new(file.products)
    }

    pub fn new(products: Vec<Product>) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            product.validate().map_err(anyhow::Error::msg)?;
            if !seen.insert(product.slug.as_str()) {
                bail!("duplicate slug {:?} in catalog", product.slug);
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_snapshot_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let raw = r#"{"products":[
            {"id":1,"slug":"cap","title":"Cap","description":"","image":"/a.png","price":1},
            {"id":2,"slug":"cap","title":"Cap 2","description":"","image":"/b.png","price":2}
        ]}"#;
        let err = Catalog::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate slug"));
    }
}
