use crate::domain::search::search;
use crate::transport::http::handlers::common::error_response;
use crate::transport::http::types::{AppState, SearchParams};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/products/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Products whose title contains `q` (possibly empty)", body = Vec<Product>),
        (status = 400, description = "Missing or empty `q`", body = ApiResponse)
    )
)]
pub async fn search_products_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    match search(params.q.as_deref(), state.catalog.products()) {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "rejected search request");
            error_response(&e).into_response()
        }
    }
}
