//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use vaultlink_core::Config;
use vaultlink_services::SubmitService;
use vaultlink_storage::LocalContentStore;

use crate::state::AppState;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(AppState, axum::Router)> {
    let store = LocalContentStore::new(&config.storage_root)
        .context("Failed to initialize content store")?;
    let store = Arc::new(store);

    std::fs::create_dir_all(&config.spool_dir).context("Failed to create spool directory")?;

    let submit_service = Arc::new(SubmitService::new(
        store.clone(),
        config.spool_dir.clone(),
    ));

    let state = AppState {
        settings_path: config.settings_path.clone(),
        store,
        submit_service,
        config: config.clone(),
    };

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
