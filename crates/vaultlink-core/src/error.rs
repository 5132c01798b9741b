//! Error types module
//!
//! Core error taxonomy for the archiving pipeline. All failures are unified
//! under the `AppError` enum; the message text is the contract with callers
//! and must propagate verbatim (no re-wrapping between layers).

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing file id
    Debug,
    /// Warning level - for remote-side rejections and transport failures
    Warn,
    /// Error level - for unexpected local failures
    Error,
}

/// Metadata for error responses - defines how an error is presented over HTTP
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Client-facing message; pipeline errors pass their text through unchanged
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The requested file/folder id has no match under the owner's root.
    #[error("{0}")]
    NotFound(String),

    /// Local zip-archive creation failed.
    #[error("{0}")]
    Pack(String),

    /// The remote endpoint answered with status >= 400. Every such status
    /// collapses to this one generic message.
    #[error("Bad credentials")]
    RemoteAuth,

    /// Network/TLS/DNS failure reaching the remote endpoint. The raw transport
    /// message passes through unmodified.
    #[error("{0}")]
    Transport(String),

    /// HTTP success from the remote but the expected success marker was
    /// missing from the body.
    #[error("File upload error")]
    Protocol,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The remote endpoint is not configured (empty base URL) or the settings
    /// store could not be read.
    #[error("{0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Static metadata per variant: (http_status, error_code, log_level).
///
/// The inbound surface answers 400 for every pipeline failure (the original
/// contract); only genuinely local faults surface as 500.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::NotFound(_) => (400, "NOT_FOUND", LogLevel::Debug),
        AppError::Pack(_) => (400, "PACK_ERROR", LogLevel::Error),
        AppError::RemoteAuth => (400, "REMOTE_AUTH_ERROR", LogLevel::Warn),
        AppError::Transport(_) => (400, "TRANSPORT_ERROR", LogLevel::Warn),
        AppError::Protocol => (400, "PROTOCOL_ERROR", LogLevel::Warn),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::Config(_) => (400, "CONFIG_ERROR", LogLevel::Warn),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NotFound",
            AppError::Pack(_) => "Pack",
            AppError::RemoteAuth => "RemoteAuth",
            AppError::Transport(_) => "Transport",
            AppError::Protocol => "Protocol",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }
}
