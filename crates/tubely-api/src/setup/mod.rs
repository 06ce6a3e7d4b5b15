//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::VideoRecords;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;
    let records: Arc<dyn VideoRecords> = Arc::new(VideoRepository::new(pool));

    let pipeline = storage::setup_pipeline(&config, records.clone()).await?;

    let state = Arc::new(AppState::new(config.clone(), records, pipeline));
    let router = routes::build_router(&config, state.clone());

    Ok((state, router))
}
