use crate::node::{mime_type_for, ContentNode, DirectoryNode, FileNode};
use crate::traits::{ContentStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Local filesystem content store.
///
/// Layout: one subdirectory per owner under `root`. File identifiers are the
/// inode numbers of the entries below the owner's directory, which makes id
/// lookup a pure read-only traversal with no side index to maintain.
#[derive(Clone)]
pub struct LocalContentStore {
    root: PathBuf,
}

impl LocalContentStore {
    /// Create a new LocalContentStore rooted at `root` (created if absent).
    pub fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            StorageError::BackendError(format!(
                "Failed to create storage root {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(LocalContentStore { root })
    }

    /// Owner directory with traversal-guard validation on the owner id.
    fn owner_root(&self, owner_id: &str) -> StorageResult<PathBuf> {
        if owner_id.is_empty()
            || owner_id == ".."
            || owner_id.contains('/')
            || owner_id.contains('\\')
        {
            return Err(StorageError::InvalidOwner(owner_id.to_string()));
        }
        Ok(self.root.join(owner_id))
    }
}

/// Build the metadata tree for a directory, children sorted by name so the
/// listing order (and therefore zip traversal order) is deterministic.
fn build_directory_node(path: &Path) -> std::io::Result<DirectoryNode> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut entries: Vec<_> = fs::read_dir(path)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut children = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry_path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            children.push(ContentNode::Directory(build_directory_node(&entry_path)?));
        } else if file_type.is_file() {
            children.push(ContentNode::File(build_file_node(&entry_path)?));
        }
        // Symlinks and special files are not part of an owner's content tree.
    }

    Ok(DirectoryNode {
        name,
        path: path.to_path_buf(),
        children,
    })
}

fn build_file_node(path: &Path) -> std::io::Result<FileNode> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let metadata = fs::metadata(path)?;
    Ok(FileNode {
        mime_type: mime_type_for(&name).to_string(),
        name,
        path: path.to_path_buf(),
        size: metadata.len(),
    })
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn resolve(&self, owner_id: &str, file_id: u64) -> StorageResult<ContentNode> {
        let owner_root = self.owner_root(owner_id)?;
        let owner = owner_id.to_string();
        let start = std::time::Instant::now();

        let node = tokio::task::spawn_blocking(move || -> StorageResult<ContentNode> {
            if !owner_root.is_dir() {
                return Err(StorageError::NotFound("File not found".to_string()));
            }

            for entry in WalkDir::new(&owner_root).min_depth(1) {
                let entry =
                    entry.map_err(|e| StorageError::BackendError(e.to_string()))?;
                let metadata = entry
                    .metadata()
                    .map_err(|e| StorageError::BackendError(e.to_string()))?;
                if metadata.ino() != file_id {
                    continue;
                }
                if metadata.is_dir() {
                    return Ok(ContentNode::Directory(build_directory_node(entry.path())?));
                }
                if metadata.is_file() {
                    return Ok(ContentNode::File(build_file_node(entry.path())?));
                }
            }

            Err(StorageError::NotFound("File not found".to_string()))
        })
        .await
        .map_err(|e| StorageError::BackendError(format!("Resolve task failed: {}", e)))??;

        tracing::debug!(
            owner = %owner,
            file_id,
            node = %node.name(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Resolved content node"
        );

        Ok(node)
    }
}
