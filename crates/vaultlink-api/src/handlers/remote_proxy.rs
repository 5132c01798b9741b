//! Read-only proxy routes backed by the archive endpoint.
//!
//! Each handler loads a fresh settings snapshot, builds a client, and relays
//! the endpoint's JSON answer unchanged. Failures render through the shared
//! error mapping (rejections as `Bad credentials`, transport text verbatim).

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use vaultlink_core::AppError;
use vaultlink_services::RemoteClient;

use crate::error::{ErrorResponse, HttpAppError, OwnerId};
use crate::state::AppState;

fn remote_client(state: &AppState) -> Result<RemoteClient, HttpAppError> {
    let settings = state.endpoint_settings()?;
    RemoteClient::new(&settings)
        .map_err(AppError::from)
        .map_err(HttpAppError::from)
}

#[utoipa::path(
    get,
    path = "/api/v1/connected",
    tag = "status",
    responses(
        (status = 200, description = "Archive endpoint reachable"),
        (status = 400, description = "Endpoint unreachable or rejecting", body = ErrorResponse)
    )
)]
pub async fn connected(State(state): State<AppState>) -> Result<Json<Value>, HttpAppError> {
    let client = remote_client(&state)?;
    client.status().await.map_err(AppError::from)?;
    Ok(Json(json!({ "connected": true })))
}

#[utoipa::path(
    get,
    path = "/api/v1/list-files",
    tag = "status",
    params(
        ("x-owner" = String, Header, description = "Acting owner id")
    ),
    responses(
        (status = 200, description = "Files stored for the owner"),
        (status = 400, description = "Endpoint unreachable or rejecting", body = ErrorResponse)
    )
)]
pub async fn list_files(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
) -> Result<Json<Value>, HttpAppError> {
    let client = remote_client(&state)?;
    let body = client.list_files(&owner_id).await.map_err(AppError::from)?;
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/validate-file/{id}",
    tag = "status",
    params(
        ("id" = String, Path, description = "Remote file id to validate")
    ),
    responses(
        (status = 200, description = "Validation result for one stored file"),
        (status = 400, description = "Endpoint unreachable or rejecting", body = ErrorResponse)
    )
)]
pub async fn validate_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, HttpAppError> {
    let client = remote_client(&state)?;
    let body = client.validate_file(&id).await.map_err(AppError::from)?;
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/validate-files",
    tag = "status",
    responses(
        (status = 200, description = "Validation result for the whole store"),
        (status = 400, description = "Endpoint unreachable or rejecting", body = ErrorResponse)
    )
)]
pub async fn validate_files(State(state): State<AppState>) -> Result<Json<Value>, HttpAppError> {
    let client = remote_client(&state)?;
    let body = client.validate_files().await.map_err(AppError::from)?;
    Ok(Json(body))
}
