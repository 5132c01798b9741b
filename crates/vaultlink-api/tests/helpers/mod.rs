//! Shared helpers for API integration tests.

use std::os::unix::fs::MetadataExt;
use std::path::Path;

use axum_test::TestServer;
use tempfile::TempDir;
use vaultlink_core::{Config, EndpointSettings};

#[allow(dead_code)] // Not every test binary touches every field
pub struct TestApp {
    pub server: TestServer,
    pub storage: TempDir,
    pub spool: TempDir,
    settings_dir: TempDir,
}

impl TestApp {
    /// Point the app at a (fake) archive endpoint.
    pub fn configure_endpoint(&self, url: &str) {
        let settings = EndpointSettings {
            url: url.to_string(),
            secret: "test-secret".to_string(),
            selfsigned: false,
        };
        settings
            .store(&self.settings_dir.path().join("settings.json"))
            .unwrap();
    }
}

/// Build the full router against temporary storage, spool, and settings
/// directories. The endpoint starts unconfigured.
pub fn spawn_app() -> TestApp {
    let storage = TempDir::new().unwrap();
    let spool = TempDir::new().unwrap();
    let settings_dir = TempDir::new().unwrap();

    let config = Config {
        server_port: 0,
        storage_root: storage.path().to_path_buf(),
        spool_dir: spool.path().to_path_buf(),
        settings_path: settings_dir.path().join("settings.json"),
        cors_origins: vec!["*".to_string()],
        max_body_bytes: 2 * 1024 * 1024,
        environment: "test".to_string(),
    };

    let (_state, router) = vaultlink_api::initialize_app(config).unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        storage,
        spool,
        settings_dir,
    }
}

/// The numeric file id the store assigns to a path.
#[allow(dead_code)]
pub fn file_id(path: &Path) -> u64 {
    std::fs::metadata(path).unwrap().ino()
}
