use crate::domain::error::CatalogError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;

/// Error envelope for a failed request. Upstream details stay in the logs;
/// the caller only sees a generic failure for them.
pub fn error_response(err: &CatalogError) -> (StatusCode, Json<ApiResponse>) {
    let message = match err {
        CatalogError::Validation(msg) => msg.clone(),
        CatalogError::NotFound { .. } => "Product not found".to_string(),
        _ => "Failed to fetch product".to_string(),
    };
    (err.status_code(), Json(ApiResponse::err(message)))
}
