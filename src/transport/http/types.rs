use crate::app::storefront_service::StorefrontService;
use crate::domain::search::Catalog;
use crate::domain::storefront::{BuildTarget, StaticPageSet};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<StorefrontService>,
    /// Fixed at startup; never changes while the server runs.
    pub static_pages: Arc<StaticPageSet>,
    /// Embedded snapshot backing the search route.
    pub catalog: Arc<Catalog>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring matched against product titles.
    pub q: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct BuildTargetsResponse {
    pub slugs: Vec<String>,
}

impl BuildTargetsResponse {
    pub fn from_targets(targets: &[BuildTarget]) -> Self {
        Self {
            slugs: targets.iter().map(|t| t.slug.clone()).collect(),
        }
    }
}
