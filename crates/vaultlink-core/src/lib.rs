//! Vaultlink Core Library
//!
//! This crate provides the domain models, error taxonomy, and configuration
//! shared across all Vaultlink components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, EndpointSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{SubmissionOutcome, SubmissionRequest};
