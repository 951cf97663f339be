mod catalog;
mod config;
mod db;
mod errors;
mod matching;
mod models;
mod notifications;
mod profile;
mod routes;
mod state;
mod store;
mod tracker;

use anyhow::Result;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::matching::scorer::SkillCgpaScorer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryRecordStore, PgRecordStore, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Placify API v{}", env!("CARGO_PKG_VERSION"));

    // Record store: PostgreSQL when configured, process memory otherwise
    let store: Arc<dyn RecordStore> = match &config.database_url {
        Some(url) => Arc::new(PgRecordStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set, records are kept in memory and lost on restart");
            Arc::new(MemoryRecordStore::new())
        }
    };

    // Opportunity catalog
    let catalog = Catalog::load(config.catalog_path.as_deref(), Utc::now())?;

    let state = AppState {
        store,
        catalog: Arc::new(catalog),
        config: config.clone(),
        scorer: Arc::new(SkillCgpaScorer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
