//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, bail, Context};
use std::time::Duration;

pub const DEFAULT_SITE_NAME: &str = "devstore";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
/// Freshness window for product detail responses.
pub const DEFAULT_PRODUCT_REVALIDATE_SECS: u64 = 60 * 60;
pub const DEFAULT_CACHE_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the remote catalog service, without a trailing slash.
    pub catalog_api_base_url: String,
    /// Suffix composed into every document title.
    pub site_name: String,
    pub bind_addr: String,
    pub product_revalidate_secs: u64,
    pub cache_sweep_interval: Duration,
    /// Transport timeout for outbound calls. `None` keeps the client default.
    pub request_timeout: Option<Duration>,
}

impl StorefrontConfig {
    /// Reads configuration from the process environment (after `.env`, if present).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base = lookup("CATALOG_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("CATALOG_API_BASE_URL must be set"))?;
        let catalog_api_base_url = normalize_base_url(&base)?;

        let site_name = lookup("SITE_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string());
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let product_revalidate_secs = parse_secs(&lookup, "PRODUCT_REVALIDATE_SECS")?
            .unwrap_or(DEFAULT_PRODUCT_REVALIDATE_SECS);
        if product_revalidate_secs == 0 {
            bail!("PRODUCT_REVALIDATE_SECS must be at least 1");
        }

        let sweep_secs = parse_secs(&lookup, "CACHE_SWEEP_INTERVAL_SECS")?
            .unwrap_or(DEFAULT_CACHE_SWEEP_INTERVAL_SECS)
            .max(1);
        let request_timeout = parse_secs(&lookup, "CATALOG_REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs);

        Ok(Self {
            catalog_api_base_url,
            site_name,
            bind_addr,
            product_revalidate_secs,
            cache_sweep_interval: Duration::from_secs(sweep_secs),
            request_timeout,
        })
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<u64>> {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("{} must be a valid u64", key)),
        _ => Ok(None),
    }
}

/// Validates the base URL and strips any trailing slash so paths can be appended.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .with_context(|| format!("CATALOG_API_BASE_URL is not a valid URL: {}", trimmed))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("CATALOG_API_BASE_URL must use http or https, got {}", url.scheme());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
