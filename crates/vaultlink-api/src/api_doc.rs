//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vaultlink API",
        version = "0.1.0",
        description = "File-archiving bridge: resolves files and folders from the local content store, packs folders into zip archives, and forwards payloads to an external archive endpoint. All endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::submit::submit_file,
        handlers::remote_proxy::connected,
        handlers::remote_proxy::list_files,
        handlers::remote_proxy::validate_file,
        handlers::remote_proxy::validate_files,
        handlers::settings::update_settings,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::submit::SubmitFileBody,
        handlers::submit::SubmitFileResponse,
        handlers::settings::SettingsBody,
    )),
    tags(
        (name = "submission", description = "Submit files and folders to the archive endpoint"),
        (name = "status", description = "Connectivity and remote-store queries"),
        (name = "admin", description = "Endpoint settings administration")
    )
)]
pub struct ApiDoc;
