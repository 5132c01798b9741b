//! Content-store abstraction trait
//!
//! This module defines the ContentStore trait the resolver implements.

use crate::node::ContentNode;
use async_trait::async_trait;
use thiserror::Error;

/// Content-store operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// No node with the requested id under the owner's root. The message text
    /// is part of the submission contract and surfaces verbatim to callers.
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid owner id: {0}")]
    InvalidOwner(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for content-store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Content-store abstraction.
///
/// Maps an opaque numeric file identifier plus an owning-user context to a
/// concrete content node. Resolution is a read-only traversal: the returned
/// node is owned by the caller for the duration of one submission request and
/// nothing is cached across requests.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Resolve `file_id` under `owner_id`'s storage root.
    ///
    /// Fails with `StorageError::NotFound("File not found")` when no node
    /// matches. Directory nodes come back with their full subtree materialized
    /// (metadata only); packing is the caller's responsibility.
    async fn resolve(&self, owner_id: &str, file_id: u64) -> StorageResult<ContentNode>;
}
