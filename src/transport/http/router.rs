use crate::domain::product::Product;
use crate::domain::storefront::{BuildTarget, Installments, PageMetadata, ProductPage, RenderMode};
use crate::transport::http::handlers::{build, health, product, search};
use crate::transport::http::types::{ApiResponse, AppState, BuildTargetsResponse};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        search::search_products_handler,
        product::product_page_handler,
        product::product_metadata_handler,
        build::build_targets_handler
    ),
    components(schemas(
        ApiResponse,
        Product,
        ProductPage,
        PageMetadata,
        Installments,
        RenderMode,
        BuildTarget,
        BuildTargetsResponse
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/products/search", get(search::search_products_handler))
        .route("/product/:slug", get(product::product_page_handler))
        .route("/product/:slug/metadata", get(product::product_metadata_handler))
        .route("/build/targets", get(build::build_targets_handler))
        .with_state(app_state)
}
