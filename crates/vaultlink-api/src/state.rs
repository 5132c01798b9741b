//! Application state.
//!
//! One `AppState` shared by every handler. The submit pipeline and content
//! store are built once at startup; the endpoint settings are deliberately NOT
//! part of the state, each handler loads a fresh snapshot from the settings
//! file so admin changes take effect without a restart.

use std::path::PathBuf;
use std::sync::Arc;

use vaultlink_core::{AppError, Config, EndpointSettings};
use vaultlink_services::SubmitService;
use vaultlink_storage::ContentStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ContentStore>,
    pub submit_service: Arc<SubmitService>,
    pub settings_path: PathBuf,
}

impl AppState {
    /// Load the current endpoint-settings snapshot for one request.
    pub fn endpoint_settings(&self) -> Result<EndpointSettings, AppError> {
        EndpointSettings::load(&self.settings_path)
    }
}
