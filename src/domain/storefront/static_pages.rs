//! Static generation membership.
//!
//! Which slugs get pre-rendered is decided once, from whatever the featured
//! query returned. A failed query means an empty set: every product then
//! renders on demand, and the build itself never fails because of it.

use crate::domain::error::CatalogError;
use crate::domain::product::Product;
use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BuildTarget {
    pub slug: String,
}

/// Pure mapping from the featured query outcome to build targets.
///
/// Failures are logged and absorbed. Duplicate slugs collapse to the first
/// occurrence.
pub fn build_targets_from(featured: Result<Vec<Product>, CatalogError>) -> Vec<BuildTarget> {
    let products = match featured {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(
                error = %e,
                "error fetching featured products; falling back to on-demand rendering"
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| seen.insert(p.slug.clone()))
        .map(|p| BuildTarget { slug: p.slug })
        .collect()
}

/// The set of slugs pre-rendered at startup. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct StaticPageSet {
    targets: Vec<BuildTarget>,
    slugs: HashSet<String>,
}

impl StaticPageSet {
    pub fn new(targets: Vec<BuildTarget>) -> Self {
        let slugs = targets.iter().map(|t| t.slug.clone()).collect();
        Self { targets, slugs }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    pub fn targets(&self) -> &[BuildTarget] {
        &self.targets
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.slug.as_str())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
