//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use courier_core::Config;
use courier_processing::Ingestor;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.base.environment,
        storage_backend = %config.storage_backend(),
        "Configuration loaded and validated successfully"
    );

    let state = build_state(config)?;
    let router = routes::setup_routes(&state.config, state.clone());

    Ok((state, router))
}

/// Create the ingestor for the configured storage backend.
pub fn build_state(config: Config) -> Result<Arc<AppState>> {
    let connector = courier_storage::connector_for(&config.ingest)
        .context("Failed to initialize storage connector")?;
    let ingestor =
        Ingestor::new(&config.ingest, connector).context("Failed to initialize ingestor")?;

    Ok(Arc::new(AppState::new(config, ingestor)))
}
