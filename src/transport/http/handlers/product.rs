use crate::transport::http::handlers::common::error_response;
use crate::transport::http::types::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/product/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product page model", body = ProductPage),
        (status = 400, description = "Malformed slug", body = ApiResponse),
        (status = 404, description = "No such product upstream", body = ApiResponse),
        (status = 502, description = "Catalog service failure", body = ApiResponse)
    )
)]
pub async fn product_page_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.storefront.product_page(&slug, &state.static_pages).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/product/{slug}/metadata",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Document metadata for the product page", body = PageMetadata),
        (status = 400, description = "Malformed slug", body = ApiResponse),
        (status = 404, description = "No such product upstream", body = ApiResponse),
        (status = 502, description = "Catalog service failure", body = ApiResponse)
    )
)]
pub async fn product_metadata_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.storefront.product_metadata(&slug).await {
        Ok(metadata) => (StatusCode::OK, Json(metadata)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}
