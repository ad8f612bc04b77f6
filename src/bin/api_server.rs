// src/bin/api_server.rs

use devstore_catalog::infra::logging::init_logging;
use devstore_catalog::transport;
use devstore_catalog::{
    Catalog, CatalogCache, CatalogClient, StaticPageSet, StorefrontConfig, StorefrontService,
};
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let config = StorefrontConfig::from_env()?;

    // --- Cache + data client ---
    let cache = Arc::new(CatalogCache::new());
    let client = CatalogClient::from_config(&config, cache.clone())?;
    let storefront = StorefrontService::from_config(client, &config);
    tracing::info!(
        base_url = %config.catalog_api_base_url,
        revalidate_secs = config.product_revalidate_secs,
        "catalog client initialized"
    );

    // --- Search snapshot ---
    let catalog = Catalog::embedded()?;
    tracing::info!(products = catalog.len(), "loaded embedded search catalog");

    // --- Static generation ---
    let static_pages = StaticPageSet::new(storefront.resolve_build_targets().await);
    storefront.prerender(&static_pages).await;

    let shutdown = Arc::new(Notify::new());
    let sweeper = cache
        .clone()
        .start_background_sweep_task(config.cache_sweep_interval, shutdown.clone());

    let app_state = transport::http::AppState {
        storefront: Arc::new(storefront),
        static_pages: Arc::new(static_pages),
        catalog: Arc::new(catalog),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "storefront listening");
    tracing::info!("swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    shutdown.notify_one();
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "cache sweep task did not stop cleanly");
    }
    tracing::info!("graceful shutdown complete");
    Ok(())
}
