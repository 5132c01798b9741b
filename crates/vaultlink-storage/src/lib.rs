//! Vaultlink Storage
//!
//! Content-node model and the resolver that maps `(owner, file_id)` pairs to
//! concrete files or directory subtrees on the local filesystem.

pub mod local;
pub mod node;
pub mod traits;

pub use local::LocalContentStore;
pub use node::{mime_type_for, ContentNode, DirectoryNode, FileNode};
pub use traits::{ContentStore, StorageError, StorageResult};
