//! The product record handed to page rendering.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// A read-only copy of a catalog product, as served by the remote catalog.
///
/// The core never mutates or persists these; every request works on the copy
/// it decoded (or the one the cache handed back).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Opaque upstream identifier. Numeric ids are accepted and kept as text.
    #[serde(deserialize_with = "id_from_json")]
    pub id: String,
    /// Stable, unique, URL-safe lookup key.
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Image URI.
    pub image: String,
    /// Non-negative amount in the store currency.
    pub price: f64,
}

impl Product {
    /// Checks the invariants the catalog promises but we do not trust blindly.
    pub fn validate(&self) -> Result<(), String> {
        if !is_url_safe_slug(&self.slug) {
            return Err(format!("product {} has invalid slug {:?}", self.id, self.slug));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!(
                "product {} has invalid price {}",
                self.slug, self.price
            ));
        }
        Ok(())
    }
}

/// `[A-Za-z0-9_-]+`
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = JsonValue::deserialize(deserializer)?;
    if let Some(s) = raw.as_str() {
        return Ok(s.to_string());
    }
    if let Some(i) = raw.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = raw.as_u64() {
        return Ok(u.to_string());
    }
    Err(serde::de::Error::custom(format!(
        "expected string or integer id, got {}",
        raw
    )))
}
