//! Submission Orchestrator
//!
//! Drives one submission end to end: resolve the content node, pack it if it
//! is a directory, transmit it to the archive endpoint, and interpret the
//! endpoint's answer. The spool artifact created for a directory is deleted
//! on every exit path, success or failure.

use std::path::PathBuf;
use std::sync::Arc;

use vaultlink_core::{AppError, EndpointSettings, SubmissionOutcome, SubmissionRequest};
use vaultlink_storage::{ContentNode, ContentStore, FileNode, StorageError};

use crate::pack::{self, PackError, ZipArtifact};
use crate::remote::{OutboundFile, RemoteClient, RemoteError};

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::BadCredentials => AppError::RemoteAuth,
            RemoteError::Transport(msg) => AppError::Transport(msg),
            RemoteError::Payload(_) => AppError::Protocol,
            RemoteError::NotConfigured => {
                AppError::Config("Archive endpoint is not configured".to_string())
            }
            RemoteError::PayloadFile(path, msg) => {
                AppError::Internal(format!("Failed to open payload {}: {}", path.display(), msg))
            }
        }
    }
}

impl From<PackError> for AppError {
    fn from(err: PackError) -> Self {
        AppError::Pack(err.to_string())
    }
}

fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(msg) => AppError::NotFound(msg),
        StorageError::InvalidOwner(msg) => AppError::InvalidInput(msg),
        other => AppError::Internal(other.to_string()),
    }
}

/// End-to-end submission pipeline over a content store and a spool directory.
pub struct SubmitService {
    store: Arc<dyn ContentStore>,
    spool_dir: PathBuf,
}

impl SubmitService {
    pub fn new(store: Arc<dyn ContentStore>, spool_dir: PathBuf) -> Self {
        Self { store, spool_dir }
    }

    /// Submit one file or folder to the archive endpoint.
    ///
    /// Steps, in order: resolve the node (a miss is terminal, nothing is
    /// transmitted), confirm the endpoint is configured, pack directories into
    /// a spool artifact, stream the payload, and require a remote identifier
    /// in the response body. A 2xx answer without one is a protocol failure.
    pub async fn submit_file(
        &self,
        settings: &EndpointSettings,
        request: &SubmissionRequest,
    ) -> Result<SubmissionOutcome, AppError> {
        let start = std::time::Instant::now();

        let node = self
            .store
            .resolve(&request.owner_id, request.file_id)
            .await
            .map_err(storage_error)?;

        let client = RemoteClient::new(settings)?;

        tracing::info!(
            owner = %request.owner_id,
            file_id = request.file_id,
            node = %node.name(),
            comment = %request.comment,
            "Starting submission"
        );

        // The artifact must outlive the remote call so its drop guard removes
        // the spool file after transmission, on failure paths included.
        let _artifact: Option<ZipArtifact>;
        let payload = match node {
            ContentNode::File(ref file) => {
                _artifact = None;
                outbound_from_file(file)
            }
            ContentNode::Directory(dir) => {
                let spool_dir = self.spool_dir.clone();
                let artifact =
                    tokio::task::spawn_blocking(move || pack::pack(&dir, &spool_dir))
                        .await
                        .map_err(|e| AppError::Internal(format!("Pack task failed: {}", e)))??;
                let payload = OutboundFile {
                    path: artifact.path().to_path_buf(),
                    file_name: artifact.upload_name().to_string(),
                    mime_type: "application/zip".to_string(),
                };
                _artifact = Some(artifact);
                payload
            }
        };

        let body = client.submit_payload(&request.owner_id, &payload).await?;

        let remote_id = body
            .get("status")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(AppError::Protocol)?;

        tracing::info!(
            owner = %request.owner_id,
            file_id = request.file_id,
            remote_id = %remote_id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Submission accepted by archive endpoint"
        );

        Ok(SubmissionOutcome { remote_id })
    }
}

fn outbound_from_file(file: &FileNode) -> OutboundFile {
    OutboundFile {
        path: file.path.clone(),
        file_name: file.name.clone(),
        mime_type: file.mime_type.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use vaultlink_storage::{DirectoryNode, StorageResult};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixtureStore {
        nodes: Vec<(u64, ContentNode)>,
    }

    #[async_trait]
    impl ContentStore for FixtureStore {
        async fn resolve(&self, _owner_id: &str, file_id: u64) -> StorageResult<ContentNode> {
            self.nodes
                .iter()
                .find(|(id, _)| *id == file_id)
                .map(|(_, node)| clone_node(node))
                .ok_or_else(|| StorageError::NotFound("File not found".to_string()))
        }
    }

    fn clone_node(node: &ContentNode) -> ContentNode {
        match node {
            ContentNode::File(f) => ContentNode::File(FileNode {
                name: f.name.clone(),
                path: f.path.clone(),
                size: f.size,
                mime_type: f.mime_type.clone(),
            }),
            ContentNode::Directory(d) => ContentNode::Directory(DirectoryNode {
                name: d.name.clone(),
                path: d.path.clone(),
                children: d.children.iter().map(clone_node).collect(),
            }),
        }
    }

    fn request(file_id: u64) -> SubmissionRequest {
        SubmissionRequest {
            owner_id: "alice".to_string(),
            file_id,
            comment: String::new(),
        }
    }

    fn settings(url: &str) -> EndpointSettings {
        EndpointSettings {
            url: url.to_string(),
            secret: "s3cret".to_string(),
            selfsigned: false,
        }
    }

    fn fixture_file(dir: &std::path::Path) -> ContentNode {
        let path = dir.join("notes.txt");
        std::fs::write(&path, b"contents").unwrap();
        ContentNode::File(FileNode {
            name: "notes.txt".to_string(),
            path,
            size: 8,
            mime_type: "text/plain".to_string(),
        })
    }

    fn fixture_dir(dir: &std::path::Path) -> ContentNode {
        let root = dir.join("project");
        std::fs::create_dir_all(&root).unwrap();
        let file_path = root.join("readme.md");
        std::fs::write(&file_path, b"# readme").unwrap();
        ContentNode::Directory(DirectoryNode {
            name: "project".to_string(),
            path: root,
            children: vec![ContentNode::File(FileNode {
                name: "readme.md".to_string(),
                path: file_path,
                size: 8,
                mime_type: "text/markdown".to_string(),
            })],
        })
    }

    fn service(store_nodes: Vec<(u64, ContentNode)>, spool: &std::path::Path) -> SubmitService {
        SubmitService::new(
            Arc::new(FixtureStore { nodes: store_nodes }),
            spool.to_path_buf(),
        )
    }

    #[tokio::test]
    async fn test_submit_file_returns_remote_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/submit-file"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "abc123"})))
            .expect(1)
            .mount(&server)
            .await;

        let data = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let service = service(vec![(7, fixture_file(data.path()))], spool.path());

        let outcome = service
            .submit_file(&settings(&server.uri()), &request(7))
            .await
            .unwrap();
        assert_eq!(outcome.remote_id, "abc123");
    }

    #[tokio::test]
    async fn test_missing_node_is_terminal() {
        let server = MockServer::start().await;
        let spool = tempfile::tempdir().unwrap();
        let service = service(vec![], spool.path());

        let err = service
            .submit_file(&settings(&server.uri()), &request(99))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "File not found");

        // Nothing may reach the endpoint on a resolution miss.
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_success_without_remote_id_is_upload_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/submit-file"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let data = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let service = service(vec![(7, fixture_file(data.path()))], spool.path());

        let err = service
            .submit_file(&settings(&server.uri()), &request(7))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "File upload error");
    }

    #[tokio::test]
    async fn test_rejection_maps_to_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/submit-file"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let data = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let service = service(vec![(7, fixture_file(data.path()))], spool.path());

        let err = service
            .submit_file(&settings(&server.uri()), &request(7))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[tokio::test]
    async fn test_directory_is_packed_and_spool_cleaned_up() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/submit-file"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "dir-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let data = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let service = service(vec![(3, fixture_dir(data.path()))], spool.path());

        let outcome = service
            .submit_file(&settings(&server.uri()), &request(3))
            .await
            .unwrap();
        assert_eq!(outcome.remote_id, "dir-1");

        let requests = server.received_requests().await.unwrap();
        let raw = String::from_utf8_lossy(&requests[0].body).into_owned();
        assert!(raw.contains("filename=\"project.zip\""));

        assert!(std::fs::read_dir(spool.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_spool_cleaned_up_when_submission_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/submit-file"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let data = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let service = service(vec![(3, fixture_dir(data.path()))], spool.path());

        let err = service
            .submit_file(&settings(&server.uri()), &request(3))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad credentials");

        assert!(std::fs::read_dir(spool.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint_rejected_before_packing() {
        let data = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let service = service(vec![(3, fixture_dir(data.path()))], spool.path());

        let err = service
            .submit_file(&EndpointSettings::default(), &request(3))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(std::fs::read_dir(spool.path()).unwrap().next().is_none());
    }
}
