//! geopin - Interactive geocoding web app with Hexagonal Architecture
//!
//! This is the composition root that wires together all the components.

mod adapters;
mod application;
mod config;
mod domain;

use crate::adapters::inbound::{AppState, SessionStore, WebServer};
use crate::adapters::outbound::{CachedGeocoder, OpenCageClient};
use crate::application::GeocodeService;
use crate::config::load_config;
use crate::domain::basemap::BasemapCatalog;
use crate::domain::ports::GeocodeProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting geopin listen={} provider={}",
        cfg.listen_addr,
        cfg.geocoder_url
    );

    // ===== COMPOSITION ROOT =====
    // Wire up all adapters and services

    // 1. Create outbound adapters

    // Geocoding provider (OpenCage) behind the result cache
    let provider: Arc<dyn GeocodeProvider> = Arc::new(OpenCageClient::new(
        cfg.geocoder_url.clone(),
        cfg.api_key.clone(),
    ));

    let cache = Arc::new(CachedGeocoder::new(
        provider,
        Duration::from_secs(cfg.cache_ttl_secs),
    ));
    cache.start_gc(Duration::from_secs(cfg.cache_gc_interval_secs));

    // 2. Create application service and domain catalog
    let service = Arc::new(GeocodeService::new(cache));
    let catalog = Arc::new(BasemapCatalog::new());

    // 3. Create session store
    let sessions = SessionStore::new(Duration::from_secs(cfg.session_ttl_secs));
    sessions.start_cleanup_task(Duration::from_secs(cfg.session_gc_interval_secs));

    // 4. Create inbound adapter and run
    let server = WebServer::new(cfg.listen_addr, AppState::new(service, catalog, sessions));

    server.run().await
}
