//! Submission endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vaultlink_core::SubmissionRequest;

use crate::error::{ErrorResponse, HttpAppError, OwnerId, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitFileBody {
    /// Numeric id of the file or folder under the owner's storage root
    pub file_id: u64,
    /// Free-text comment; logged with the submission, never sent to the endpoint
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitFileResponse {
    /// Identifier the archive endpoint assigned to the stored payload
    pub remote_file_id: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/submit-file",
    tag = "submission",
    params(
        ("x-owner" = String, Header, description = "Acting owner id")
    ),
    request_body = SubmitFileBody,
    responses(
        (status = 200, description = "Payload accepted by the archive endpoint", body = SubmitFileResponse),
        (status = 400, description = "Resolution, packing, or endpoint failure", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn submit_file(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    ValidatedJson(body): ValidatedJson<SubmitFileBody>,
) -> Result<Json<SubmitFileResponse>, HttpAppError> {
    let settings = state.endpoint_settings()?;
    let request = SubmissionRequest {
        owner_id,
        file_id: body.file_id,
        comment: body.comment,
    };

    let outcome = state.submit_service.submit_file(&settings, &request).await?;

    Ok(Json(SubmitFileResponse {
        remote_file_id: outcome.remote_id,
    }))
}
