//! Content-node model.
//!
//! A resolved file or folder is represented as a tagged enum so that callers
//! dispatch with an exhaustive match instead of runtime type inspection. The
//! node tree is metadata only; file bytes stay on disk and are read at
//! submission/packing time through `FileNode::path`.

use std::path::PathBuf;

/// A regular file under an owner's root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    /// Absolute path on the local filesystem.
    pub path: PathBuf,
    pub size: u64,
    pub mime_type: String,
}

/// A directory under an owner's root, with its children materialized in the
/// store's listing order (name-sorted, so traversal is deterministic).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryNode {
    pub name: String,
    /// Absolute path on the local filesystem.
    pub path: PathBuf,
    pub children: Vec<ContentNode>,
}

/// A resolved content node: either a file or a directory subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentNode {
    File(FileNode),
    Directory(DirectoryNode),
}

impl ContentNode {
    pub fn name(&self) -> &str {
        match self {
            ContentNode::File(f) => &f.name,
            ContentNode::Directory(d) => &d.name,
        }
    }
}

/// Best-effort MIME type from the file extension. Unknown extensions fall back
/// to `application/octet-stream`, which is also what the remote endpoint
/// assumes for zip-less binary payloads.
pub fn mime_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "md" | "log" => "text/plain",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}
