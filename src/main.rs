//! postcache server binary
//!
//! Wires the three tier adapters together and serves the lookup endpoint.
//! Connections to Redis and MongoDB are established once here and owned for
//! the process lifetime; requests only ever borrow them.

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use postcache::cache::RedisCache;
use postcache::config::Config;
use postcache::lookup::TieredLookup;
use postcache::origin::HttpOrigin;
use postcache::server::{router, AppState};
use postcache::store::MongoStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let log_level = env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env();
    info!(
        bind = %config.bind_addr,
        origin = %config.origin_url,
        ttl_secs = config.cache_ttl.as_secs(),
        "Starting postcache"
    );

    // Cache tier. Startup requires Redis to be reachable once to build the
    // shared connection; after that, per-request outages degrade to misses.
    let cache = RedisCache::connect(&config.redis_url, config.tier_timeout)
        .await
        .context("Failed to connect to Redis")?;

    // Store tier. The unique index is what makes insert_if_absent atomic,
    // so it must exist before the first request is served.
    let store = MongoStore::connect(
        &config.mongodb_url,
        &config.mongodb_database,
        &config.mongodb_collection,
        config.tier_timeout,
    )
    .await
    .context("Failed to connect to MongoDB")?;
    store
        .ensure_indexes()
        .await
        .context("Failed to ensure store indexes")?;

    // Origin tier.
    let origin = HttpOrigin::new(&config.origin_url, config.tier_timeout)
        .context("Failed to build origin client")?;

    let lookup = TieredLookup::new(cache, store, origin, config.cache_ttl);
    let state = AppState {
        lookup: Arc::new(lookup),
    };

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    } else {
        info!("Received shutdown signal, draining...");
    }
}
