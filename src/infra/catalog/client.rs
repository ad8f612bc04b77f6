// Responsible for all communication with the remote catalog service.

use crate::domain::error::CatalogError;
use crate::infra::config::StorefrontConfig;
use crate::storage::cache::{CachePolicy, CatalogCache, RequestKey};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// HTTP client for the catalog service with the response cache injected.
///
/// Every failure is logged here, with the path, before it is returned; callers
/// get a typed [`CatalogError`] and decide how to surface it. Nothing is retried.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<CatalogCache>,
}

impl CatalogClient {
    /// `base_url` must not end with a slash; resource paths start with one.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        cache: Arc<CatalogCache>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            cache,
        }
    }

    pub fn from_config(config: &StorefrontConfig, cache: Arc<CatalogCache>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(
            builder.build()?,
            config.catalog_api_base_url.clone(),
            cache,
        ))
    }

    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues the GET unconditionally and, on success, records the body under
    /// the path identity for the policy's window. `NoStore` never records.
    pub async fn fetch_resource(
        &self,
        path: &str,
        policy: CachePolicy,
    ) -> Result<Arc<[u8]>, CatalogError> {
        let body = self.get_upstream(path).await?;
        if let Some(window) = policy.window() {
            self.cache.store(RequestKey::from_resource(path), body.clone(), window);
        }
        Ok(body)
    }

    /// Serves a fresh cached body when there is one; otherwise fetches and
    /// records it. Concurrent misses on one path may each go upstream; the last
    /// one to finish wins the cache slot.
    pub async fn fetch_with_cache(
        &self,
        path: &str,
        policy: CachePolicy,
    ) -> Result<Arc<[u8]>, CatalogError> {
        if policy.window().is_some() {
            let key = RequestKey::from_resource(path);
            if let Some(hit) = self.cache.lookup(&key) {
                tracing::debug!(path, expires_at = %hit.expires_at, "catalog cache hit");
                return Ok(hit.body);
            }
            tracing::debug!(path, "catalog cache miss");
        }
        self.fetch_resource(path, policy).await
    }

    /// Like [`fetch_with_cache`](Self::fetch_with_cache), but the body is only
    /// recorded once `decode` accepts it. A success response the core rejects
    /// is a failure like any other and is never served from cache.
    pub async fn fetch_decoded<T, F>(
        &self,
        path: &str,
        policy: CachePolicy,
        decode: F,
    ) -> Result<T, CatalogError>
    where
        F: Fn(&[u8]) -> Result<T, CatalogError>,
    {
        let key = RequestKey::from_resource(path);
        if policy.window().is_some() {
            if let Some(hit) = self.cache.lookup(&key) {
                tracing::debug!(path, expires_at = %hit.expires_at, "catalog cache hit");
                return decode(&hit.body);
            }
            tracing::debug!(path, "catalog cache miss");
        }

        let body = self.get_upstream(path).await?;
        let value = decode(&body)?;
        if let Some(window) = policy.window() {
            self.cache.store(key, body, window);
        }
        Ok(value)
    }

    /// [`fetch_decoded`](Self::fetch_decoded) with plain JSON decoding.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        policy: CachePolicy,
    ) -> Result<T, CatalogError> {
        self.fetch_decoded(path, policy, |body| decode_json(path, body)).await
    }

    async fn get_upstream(&self, path: &str) -> Result<Arc<[u8]>, CatalogError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::error!(path, error = %e, "catalog request failed");
            CatalogError::Network {
                path: path.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(path, "catalog resource not found");
            return Err(CatalogError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            tracing::error!(
                path,
                status = status.as_u16(),
                "catalog service returned failure status"
            );
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(path, error = %e, "catalog response body could not be read");
            CatalogError::Network {
                path: path.to_string(),
                source: e,
            }
        })?;
        Ok(Arc::from(bytes.as_ref()))
    }
}

/// Decodes a catalog response body, logging the path on failure.
pub fn decode_json<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T, CatalogError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::error!(path, error = %e, "catalog response did not decode");
        CatalogError::InvalidPayload {
            path: path.to_string(),
            reason: e.to_string(),
        }
    })
}
