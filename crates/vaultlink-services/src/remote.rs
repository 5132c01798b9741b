//! Remote Submission Client
//!
//! HTTP client for the external archive endpoint. Every call re-reads its
//! settings from the caller, authenticates with the shared secret in the
//! `x-access-secret` header, and runs without a request timeout so large
//! uploads are never cut off mid-transfer.
//!
//! Any HTTP status of 400 or above collapses to [`RemoteError::BadCredentials`];
//! the endpoint's own error bodies are not surfaced. Transport failures keep
//! their underlying description.

use std::path::PathBuf;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio_util::io::ReaderStream;
use vaultlink_core::EndpointSettings;

const ACCESS_SECRET_HEADER: &str = "x-access-secret";

/// Errors talking to the archive endpoint
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Bad credentials")]
    BadCredentials,

    #[error("{0}")]
    Transport(String),

    #[error("Endpoint returned an unreadable response: {0}")]
    Payload(String),

    #[error("Archive endpoint is not configured")]
    NotConfigured,

    #[error("Failed to open payload {0}: {1}")]
    PayloadFile(PathBuf, String),
}

/// A local file staged for multipart submission.
pub struct OutboundFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

/// Client over a per-request snapshot of the endpoint settings.
#[derive(Debug)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
    secret: String,
}

impl RemoteClient {
    /// Build a client from a settings snapshot. Fails if no endpoint URL is
    /// configured or the TLS stack cannot be initialized.
    pub fn new(settings: &EndpointSettings) -> Result<Self, RemoteError> {
        let base_url = settings
            .require_url()
            .map_err(|_| RemoteError::NotConfigured)?
            .to_string();

        // No timeout: submissions stream arbitrarily large artifacts.
        let client = Client::builder()
            .danger_accept_invalid_certs(settings.selfsigned)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            secret: settings.secret.clone(),
        })
    }

    /// Transmit a file as `multipart/form-data` with `file` and `owner` parts.
    /// Returns the endpoint's decoded JSON body.
    pub async fn submit_payload(
        &self,
        owner_id: &str,
        payload: &OutboundFile,
    ) -> Result<Value, RemoteError> {
        let file = tokio::fs::File::open(&payload.path)
            .await
            .map_err(|e| RemoteError::PayloadFile(payload.path.clone(), e.to_string()))?;
        let size_bytes = file
            .metadata()
            .await
            .map(|m| m.len())
            .unwrap_or_default();

        let part = Part::stream(Body::wrap_stream(ReaderStream::new(file)))
            .file_name(payload.file_name.clone())
            .mime_str(&payload.mime_type)
            .map_err(|e| RemoteError::Payload(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("owner", owner_id.to_string());

        tracing::info!(
            owner = %owner_id,
            file_name = %payload.file_name,
            size_bytes,
            "Submitting payload to archive endpoint"
        );

        self.execute(
            self.client
                .post(format!("{}/api/submit-file", self.base_url))
                .multipart(form),
        )
        .await
    }

    /// Probe the endpoint's status route. Used as a connectivity check.
    pub async fn status(&self) -> Result<Value, RemoteError> {
        self.execute(self.client.get(format!("{}/api/status", self.base_url)))
            .await
    }

    /// List files the endpoint holds for an owner.
    pub async fn list_files(&self, owner_id: &str) -> Result<Value, RemoteError> {
        self.execute(
            self.client
                .get(format!("{}/api/list-files", self.base_url))
                .query(&[("owner", owner_id)]),
        )
        .await
    }

    /// Ask the endpoint to validate a single stored file.
    pub async fn validate_file(&self, file_id: &str) -> Result<Value, RemoteError> {
        self.execute(
            self.client
                .get(format!("{}/api/validate-file", self.base_url))
                .query(&[("fileid", file_id)]),
        )
        .await
    }

    /// Ask the endpoint to validate its whole store.
    pub async fn validate_files(&self) -> Result<Value, RemoteError> {
        self.execute(
            self.client
                .get(format!("{}/api/validate-files", self.base_url)),
        )
        .await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, RemoteError> {
        let response = request
            .header(ACCESS_SECRET_HEADER, &self.secret)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!(status = status.as_u16(), "Archive endpoint rejected request");
            return Err(RemoteError::BadCredentials);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Payload(e.to_string()))
    }
}
