//! Static generation step: prints the slugs that would be pre-rendered.
//!
//! Exits non-zero only for configuration problems. An unreachable or failing
//! catalog prints nothing and still succeeds, since every product can then be
//! rendered on demand.

use devstore_catalog::infra::logging::init_logging;
use devstore_catalog::{CatalogCache, CatalogClient, StorefrontConfig, StorefrontService};
use std::sync::Arc;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--json]\n\
         \n\
         Requires env vars:\n\
           CATALOG_API_BASE_URL\n\
         Optional:\n\
           CATALOG_REQUEST_TIMEOUT_SECS, RUST_LOG\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let as_json = args.iter().any(|a| a == "--json");

    let config = StorefrontConfig::from_env()?;
    let client = CatalogClient::from_config(&config, Arc::new(CatalogCache::new()))?;
    let storefront = StorefrontService::from_config(client, &config);

    let targets = storefront.resolve_build_targets().await;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
    } else {
        for target in &targets {
            println!("{}", target.slug);
        }
    }
    Ok(())
}
