//! In-process stand-in for the remote catalog service, plus fixtures.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use devstore_catalog::{CatalogCache, CatalogClient, ManualClock, StorefrontService};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Clone, Default)]
struct MockState {
    products: Arc<Mutex<HashMap<String, Value>>>,
    featured: Arc<Mutex<Option<Value>>>,
    forced_status: Arc<Mutex<HashMap<String, u16>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

/// Mock catalog bound to an ephemeral local port.
///
/// `GET /products/featured` answers with the configured featured list and
/// `GET /products/:slug` with the stored product, 404 otherwise. Any slug
/// (including `featured`) can be forced to answer with a given status.
pub struct MockUpstream {
    pub base_url: String,
    state: MockState,
    server: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = MockState::default();
        *state.featured.lock().unwrap() = Some(json!([]));

        let router = Router::new()
            .route("/products/:slug", get(product_route))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            server,
        }
    }

    pub fn put_product(&self, product: Value) {
        let slug = product["slug"].as_str().unwrap().to_string();
        self.state.products.lock().unwrap().insert(slug, product);
    }

    pub fn set_featured(&self, products: Vec<Value>) {
        *self.state.featured.lock().unwrap() = Some(Value::Array(products));
    }

    /// Raw body for the featured route, e.g. to send a malformed payload.
    pub fn set_featured_raw(&self, body: Value) {
        *self.state.featured.lock().unwrap() = Some(body);
    }

    pub fn force_status(&self, slug: &str, status: u16) {
        self.state
            .forced_status
            .lock()
            .unwrap()
            .insert(slug.to_string(), status);
    }

    pub fn clear_forced_status(&self, slug: &str) {
        self.state.forced_status.lock().unwrap().remove(slug);
    }

    /// Number of requests received for `path` (e.g. `/products/bone-dev`).
    pub fn hits(&self, path: &str) -> usize {
        self.state.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn product_route(State(state): State<MockState>, Path(slug): Path<String>) -> Response {
    *state
        .hits
        .lock()
        .unwrap()
        .entry(format!("/products/{}", slug))
        .or_insert(0) += 1;

    if let Some(code) = state.forced_status.lock().unwrap().get(&slug).copied() {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(json!({ "message": "forced failure" }))).into_response();
    }

    if slug == "featured" {
        let body = state.featured.lock().unwrap().clone().unwrap_or(json!([]));
        return (StatusCode::OK, Json(body)).into_response();
    }

    match state.products.lock().unwrap().get(&slug).cloned() {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Product not found" }))).into_response(),
    }
}

pub fn product_json(id: u64, slug: &str, title: &str, price: f64) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": title,
        "description": format!("{} description", title),
        "image": format!("/{}.png", slug),
        "price": price,
    })
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub struct Fixture {
    pub storefront: StorefrontService,
    pub cache: Arc<CatalogCache>,
    pub clock: Arc<ManualClock>,
}

/// Storefront wired to `base_url` with a manual clock and the default window.
pub fn storefront_for(base_url: &str) -> Fixture {
    let clock = Arc::new(ManualClock::default());
    let cache = Arc::new(CatalogCache::with_clock(clock.clone()));
    let client = CatalogClient::new(reqwest::Client::new(), base_url, cache.clone());
    Fixture {
        storefront: StorefrontService::with_defaults(client, "devstore"),
        cache,
        clock,
    }
}
