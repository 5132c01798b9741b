//! Shared HTTP client for the Vaultlink API.
//!
//! Provides a minimal client with the `x-owner` header applied to every
//! request, generic GET/POST helpers, and domain methods (submit, status,
//! list, validate). The CLI uses this client directly; the upload queue in
//! [`queue`] drives batches of submissions through it.

pub mod queue;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// API version prefix (e.g. "/api/v1"). Set VAULTLINK_API_VERSION to match the server.
pub fn api_prefix() -> String {
    let version = std::env::var("VAULTLINK_API_VERSION").unwrap_or_else(|_| "v1".to_string());
    format!("/api/{}", version)
}

/// HTTP client for the Vaultlink API, bound to one acting owner.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    owner: String,
}

/// Success body of `POST /submit-file`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitFileResult {
    pub remote_file_id: String,
}

#[derive(Debug, Serialize)]
struct SubmitFileBody<'a> {
    file_id: u64,
    comment: &'a str,
}

/// Error body shape the API answers with.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: String, owner: String) -> Result<Self> {
        // No request timeout: a submission blocks while the server packs and
        // streams the payload onward, which can take arbitrarily long.
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner,
        })
    }

    /// Create client from environment: VAULTLINK_API_URL (or API_URL) and
    /// VAULTLINK_OWNER.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("VAULTLINK_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:4000".to_string());

        let owner =
            std::env::var("VAULTLINK_OWNER").context("Missing owner. Set VAULTLINK_OWNER")?;

        Self::new(base_url, owner)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, api_prefix(), path)
    }

    /// Submit one file or folder by id. The returned error carries the API's
    /// `error` message verbatim ("File not found", "Bad credentials", ...).
    pub async fn submit_file(&self, file_id: u64, comment: &str) -> Result<SubmitFileResult> {
        let url = self.build_url("/submit-file");
        let response = self
            .client
            .post(&url)
            .header("x-owner", &self.owner)
            .json(&SubmitFileBody { file_id, comment })
            .send()
            .await
            .context("Failed to send request")?;

        Self::decode(response).await
    }

    /// True when the server can reach the archive endpoint.
    pub async fn connected(&self) -> Result<bool> {
        let body: Value = self.get("/connected").await?;
        Ok(body
            .get("connected")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    /// Files the archive endpoint holds for this owner.
    pub async fn list_files(&self) -> Result<Value> {
        self.get("/list-files").await
    }

    /// Validate one stored file by its remote id.
    pub async fn validate_file(&self, remote_id: &str) -> Result<Value> {
        self.get(&format!("/validate-file/{}", remote_id)).await
    }

    /// Validate the endpoint's whole store.
    pub async fn validate_files(&self) -> Result<Value> {
        self.get("/validate-files").await
    }

    /// GET request under the API prefix. Deserializes the JSON response.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .header("x-owner", &self.owner)
            .send()
            .await
            .context("Failed to send request")?;

        Self::decode(response).await
    }

    /// Decode a response, surfacing the API's `error` message on failure.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("API request failed with status {}", status));
            return Err(anyhow::anyhow!(message));
        }

        response
            .json::<T>()
            .await
            .context("Failed to decode response body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_submit_file_decodes_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/submit-file"))
            .and(header("x-owner", "alice"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"remote_file_id": "abc123"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "alice".to_string()).unwrap();
        let result = client.submit_file(42, "").await.unwrap();
        assert_eq!(result.remote_file_id, "abc123");
    }

    #[tokio::test]
    async fn test_error_body_message_surfaces_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/submit-file"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "File not found", "code": "NOT_FOUND"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "alice".to_string()).unwrap();
        let err = client.submit_file(42, "").await.unwrap_err();
        assert_eq!(err.to_string(), "File not found");
    }

    #[tokio::test]
    async fn test_slow_submission_is_not_cut_off() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/submit-file"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_secs(2))
                    .set_body_json(json!({"remote_file_id": "slow-1"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "alice".to_string()).unwrap();
        let result = client.submit_file(42, "").await.unwrap();
        assert_eq!(result.remote_file_id, "slow-1");
    }

    #[tokio::test]
    async fn test_connected_reads_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/connected"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"connected": true})))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), "alice".to_string()).unwrap();
        assert!(client.connected().await.unwrap());
    }
}
