//! Static membership resolution: featured products become build targets,
//! and a failing catalog degrades to an empty set instead of failing.

mod common;

use common::{product_json, storefront_for, unreachable_base_url, MockUpstream};
use devstore_catalog::StaticPageSet;
use serde_json::json;

#[tokio::test]
async fn featured_products_become_targets_in_order() {
    let upstream = MockUpstream::start().await;
    upstream.set_featured(vec![
        product_json(1, "moletom-never-stop-learning", "Moletom Never Stop Learning", 129.0),
        product_json(4, "camiseta-dowhile-2022", "Camiseta DoWhile 2022", 69.0),
    ]);
    let fx = storefront_for(&upstream.base_url);

    let targets = fx.storefront.resolve_build_targets().await;
    let slugs: Vec<&str> = targets.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, ["moletom-never-stop-learning", "camiseta-dowhile-2022"]);
}

#[tokio::test]
async fn failing_featured_query_yields_no_targets() {
    let upstream = MockUpstream::start().await;
    upstream.force_status("featured", 500);
    let fx = storefront_for(&upstream.base_url);

    assert!(fx.storefront.resolve_build_targets().await.is_empty());
    assert_eq!(upstream.hits("/products/featured"), 1);
}

#[tokio::test]
async fn unreachable_catalog_yields_no_targets() {
    let fx = storefront_for(&unreachable_base_url().await);
    assert!(fx.storefront.resolve_build_targets().await.is_empty());
}

#[tokio::test]
async fn malformed_featured_payload_yields_no_targets() {
    let upstream = MockUpstream::start().await;
    upstream.set_featured_raw(json!({ "products": "nope" }));
    let fx = storefront_for(&upstream.base_url);

    assert!(fx.storefront.resolve_build_targets().await.is_empty());
}

#[tokio::test]
async fn featured_query_is_never_cached() {
    let upstream = MockUpstream::start().await;
    upstream.set_featured(vec![product_json(6, "bone-dev", "Boné Dev", 49.9)]);
    let fx = storefront_for(&upstream.base_url);

    fx.storefront.resolve_build_targets().await;
    fx.storefront.resolve_build_targets().await;

    assert_eq!(upstream.hits("/products/featured"), 2);
    assert!(fx.cache.is_empty());
}

#[tokio::test]
async fn prerender_warms_cache_and_skips_failures() {
    let upstream = MockUpstream::start().await;
    upstream.put_product(product_json(6, "bone-dev", "Boné Dev", 49.9));
    // Featured but gone from the detail route.
    upstream.set_featured(vec![
        product_json(6, "bone-dev", "Boné Dev", 49.9),
        product_json(7, "retired-cap", "Retired Cap", 10.0),
    ]);
    let fx = storefront_for(&upstream.base_url);

    let static_pages = StaticPageSet::new(fx.storefront.resolve_build_targets().await);
    assert_eq!(static_pages.len(), 2);

    let warmed = fx.storefront.prerender(&static_pages).await;
    assert_eq!(warmed, 1);

    fx.storefront.resolve_product("bone-dev").await.unwrap();
    assert_eq!(upstream.hits("/products/bone-dev"), 1);
    assert_eq!(upstream.hits("/products/retired-cap"), 1);
}
