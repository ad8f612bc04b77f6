//! The storefront service.
//!
//! Sits between the HTTP handlers and the catalog client. It is responsible for:
//! 1.  Resolving a product by slug with the product freshness window, so a
//!     page body and its metadata are derived from the same cached snapshot.
//! 2.  Deciding the static page set from the featured query, degrading to an
//!     empty set when the catalog is unavailable.
//! 3.  Warming the cache for the static page set at startup.

use crate::domain::error::CatalogError;
use crate::domain::product::{is_url_safe_slug, Product};
use crate::domain::storefront::{
    build_targets_from, BuildTarget, PageMetadata, ProductPage, RenderMode, StaticPageSet,
};
use crate::infra::catalog::client::decode_json;
use crate::infra::catalog::CatalogClient;
use crate::infra::config::{StorefrontConfig, DEFAULT_PRODUCT_REVALIDATE_SECS};
use crate::storage::cache::CachePolicy;

pub const FEATURED_PATH: &str = "/products/featured";

pub fn product_path(slug: &str) -> String {
    format!("/products/{}", slug)
}

pub struct StorefrontService {
    client: CatalogClient,
    site_name: String,
    product_policy: CachePolicy,
}

impl StorefrontService {
    pub fn new(
        client: CatalogClient,
        site_name: impl Into<String>,
        product_revalidate_secs: u64,
    ) -> Self {
        Self {
            client,
            site_name: site_name.into(),
            product_policy: CachePolicy::revalidate(product_revalidate_secs),
        }
    }

    /// Service with the default product freshness window (one hour).
    pub fn with_defaults(client: CatalogClient, site_name: impl Into<String>) -> Self {
        Self::new(client, site_name, DEFAULT_PRODUCT_REVALIDATE_SECS)
    }

    pub fn from_config(client: CatalogClient, config: &StorefrontConfig) -> Self {
        Self::new(client, config.site_name.clone(), config.product_revalidate_secs)
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn product_policy(&self) -> CachePolicy {
        self.product_policy
    }

    /// Fetches the product behind `slug`, served from cache within the
    /// freshness window. A 404 upstream surfaces as [`CatalogError::NotFound`].
    /// Only a body that decodes and validates is recorded.
    pub async fn resolve_product(&self, slug: &str) -> Result<Product, CatalogError> {
        if !is_url_safe_slug(slug) {
            return Err(CatalogError::validation(format!("invalid product slug {:?}", slug)));
        }

        let path = product_path(slug);
        self.client
            .fetch_decoded(&path, self.product_policy, |body| {
                let product: Product = decode_json(&path, body)?;
                product.validate().map_err(|reason| {
                    tracing::error!(path = %path, %reason, "catalog returned an invalid product");
                    CatalogError::InvalidPayload {
                        path: path.clone(),
                        reason,
                    }
                })?;
                Ok(product)
            })
            .await
    }

    pub async fn product_metadata(&self, slug: &str) -> Result<PageMetadata, CatalogError> {
        let product = self.resolve_product(slug).await?;
        Ok(PageMetadata::for_product(&product, &self.site_name))
    }

    pub async fn product_page(
        &self,
        slug: &str,
        static_pages: &StaticPageSet,
    ) -> Result<ProductPage, CatalogError> {
        let product = self.resolve_product(slug).await?;
        let render_mode = if static_pages.contains(slug) {
            RenderMode::Static
        } else {
            RenderMode::OnDemand
        };
        Ok(ProductPage::new(product, &self.site_name, render_mode))
    }

    /// Runs the featured query once, uncached, and maps it to build targets.
    /// Never fails: an unavailable catalog yields no targets.
    pub async fn resolve_build_targets(&self) -> Vec<BuildTarget> {
        let featured = self
            .client
            .fetch_json::<Vec<Product>>(FEATURED_PATH, CachePolicy::NoStore)
            .await;
        let targets = build_targets_from(featured);
        tracing::info!(count = targets.len(), "resolved static build targets");
        targets
    }

    /// Resolves every static slug so its page is served from cache.
    ///
    /// Failures are logged and skipped; the slug still renders on demand.
    /// Returns the number of pages warmed.
    pub async fn prerender(&self, static_pages: &StaticPageSet) -> usize {
        let mut warmed = 0;
        for slug in static_pages.slugs() {
            match self.resolve_product(slug).await {
                Ok(_) => warmed += 1,
                Err(e) => tracing::warn!(slug, error = %e, "pre-render failed"),
            }
        }
        tracing::info!(warmed, total = static_pages.len(), "pre-rendered static pages");
        warmed
    }
}
