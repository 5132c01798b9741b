//! Configuration module
//!
//! Two layers of configuration:
//!
//! - [`Config`]: process-wide settings (port, storage root, spool directory,
//!   settings-file path), read once at startup from the environment.
//! - [`EndpointSettings`]: the remote archive endpoint triple
//!   `{url, secret, selfsigned}`, persisted in a JSON settings file and
//!   re-read as a fresh snapshot on every pipeline call, so admin changes take
//!   effect without a restart. Environment variables seed the values when the
//!   settings file does not exist yet.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_SERVER_PORT: u16 = 4000;
const DEFAULT_STORAGE_ROOT: &str = "/var/lib/vaultlink/storage";
const DEFAULT_SETTINGS_PATH: &str = "/var/lib/vaultlink/settings.json";
const DEFAULT_MAX_BODY_MB: usize = 2;

/// Process-wide application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Root directory holding one subdirectory per owner.
    pub storage_root: PathBuf,
    /// Directory where temporary zip artifacts are written before submission.
    pub spool_dir: PathBuf,
    /// Path of the JSON file holding the endpoint settings.
    pub settings_path: PathBuf,
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_body_mb = env::var("MAX_BODY_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_BODY_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_BODY_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            storage_root: env::var("STORAGE_ROOT")
                .unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_string())
                .into(),
            spool_dir: env::var("SPOOL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            settings_path: env::var("SETTINGS_PATH")
                .unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string())
                .into(),
            cors_origins,
            max_body_bytes: max_body_mb * 1024 * 1024,
            environment,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Remote archive endpoint settings. One value snapshot per request.
///
/// `url` must be non-empty before any remote call is attempted; an empty URL
/// is a configuration error, not a transport error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub selfsigned: bool,
}

impl EndpointSettings {
    /// Read the current settings snapshot from the settings file, falling back
    /// to `ARCHIVE_URL` / `ARCHIVE_SECRET` / `ARCHIVE_SELFSIGNED` when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Config(format!(
                    "Invalid settings file {}: {}",
                    path.display(),
                    e
                ))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::from_env()),
            Err(err) => Err(AppError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                err
            ))),
        }
    }

    fn from_env() -> Self {
        EndpointSettings {
            url: env::var("ARCHIVE_URL").unwrap_or_default(),
            secret: env::var("ARCHIVE_SECRET").unwrap_or_default(),
            selfsigned: env::var("ARCHIVE_SELFSIGNED")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Persist the settings to the settings file (admin surface).
    pub fn store(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(self)
            .map_err(|e| AppError::Internal(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Fail with a configuration error unless a base URL is present.
    pub fn require_url(&self) -> Result<&str, AppError> {
        let url = self.url.trim_end_matches('/');
        if url.is_empty() {
            return Err(AppError::Config(
                "Archive endpoint is not configured".to_string(),
            ));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = EndpointSettings {
            url: "https://archive.example.org".to_string(),
            secret: "s3cret".to_string(),
            selfsigned: true,
        };
        settings.store(&path).unwrap();

        let loaded = EndpointSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_settings_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, br#"{"url":"https://a.example"}"#).unwrap();

        let loaded = EndpointSettings::load(&path).unwrap();
        assert_eq!(loaded.url, "https://a.example");
        assert_eq!(loaded.secret, "");
        assert!(!loaded.selfsigned);
    }

    #[test]
    fn test_settings_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = EndpointSettings::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_require_url_rejects_empty() {
        let settings = EndpointSettings::default();
        assert!(matches!(
            settings.require_url(),
            Err(AppError::Config(_))
        ));

        let settings = EndpointSettings {
            url: "https://archive.example.org/".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.require_url().unwrap(), "https://archive.example.org");
    }
}
