//! Application setup and initialization

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use avifpress_core::Config;
use avifpress_services::{Converter, Reaper};
use avifpress_storage::ArtifactStore;

use crate::state::AppState;

/// Initialize the application: working directories, conversion service,
/// reaper and router. Directory creation failure here aborts startup.
pub async fn initialize_app(
    config: Config,
) -> Result<(Arc<AppState>, axum::Router, tokio::task::JoinHandle<()>)> {
    config.validate().context("Configuration validation failed")?;

    let store = Arc::new(
        ArtifactStore::new(&config.incoming_dir, &config.derived_dir)
            .await
            .context("Failed to initialize artifact directories")?,
    );

    let converter = Converter::new(store.clone(), config.encode_timeout());

    let reaper = Arc::new(Reaper::new(
        store.clone(),
        config.retention(),
        config.sweep_interval(),
    ));
    let reaper_handle = reaper.start();
    tracing::info!(
        retention_secs = config.retention_secs,
        sweep_interval_secs = config.sweep_interval_secs,
        "Reaper started"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        converter,
    });

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router, reaper_handle))
}
