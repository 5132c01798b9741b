//! Admin settings endpoint.
//!
//! Writes the endpoint-settings JSON file the pipeline snapshots on every
//! request, so a settings change here applies to the next submission with no
//! restart.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;
use vaultlink_core::EndpointSettings;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SettingsBody {
    /// Base URL of the archive endpoint
    #[serde(default)]
    pub url: String,
    /// Shared secret sent in the x-access-secret header
    #[serde(default)]
    pub secret: String,
    /// Accept the endpoint's self-signed TLS certificate
    #[serde(default)]
    pub selfsigned: bool,
}

#[utoipa::path(
    put,
    path = "/api/v1/settings",
    tag = "admin",
    request_body = SettingsBody,
    responses(
        (status = 200, description = "Settings stored"),
        (status = 500, description = "Settings file could not be written", body = ErrorResponse)
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SettingsBody>,
) -> Result<Json<Value>, HttpAppError> {
    let settings = EndpointSettings {
        url: body.url,
        secret: body.secret,
        selfsigned: body.selfsigned,
    };
    settings.store(&state.settings_path)?;

    tracing::info!(
        url = %settings.url,
        selfsigned = settings.selfsigned,
        "Endpoint settings updated"
    );

    Ok(Json(json!({ "status": "success" })))
}
