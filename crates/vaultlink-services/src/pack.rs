//! Zip Packer
//!
//! Serializes a resolved directory subtree into a single zip artifact in the
//! spool directory. Entry paths are relative to the packed root and always use
//! forward slashes; empty directories get an explicit `name/` entry written
//! before descending, so they survive in the output.
//!
//! The artifact is named `<directoryName>-<unixTimestampSeconds>.zip`; the
//! timestamp changes per invocation, so repeated packs produce distinct names.
//! Deleting the artifact after transmission is the calling orchestrator's
//! obligation; [`ZipArtifact`] enforces it with a drop guard so the file is
//! removed on every exit path.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use vaultlink_storage::{ContentNode, DirectoryNode};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Errors during archive creation
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Archive IO error: {0}")]
    Io(#[from] io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Entry {0} is outside the packed root")]
    OutsideRoot(PathBuf),
}

/// A packed zip artifact in the spool directory.
///
/// Owns the on-disk file: dropping the artifact deletes it, whether the
/// submission that consumed it succeeded or failed.
#[derive(Debug)]
pub struct ZipArtifact {
    path: PathBuf,
    upload_name: String,
}

impl ZipArtifact {
    /// On-disk location of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Filename to present to the remote endpoint: `<directoryName>.zip`,
    /// without the timestamp qualifier.
    pub fn upload_name(&self) -> &str {
        &self.upload_name
    }
}

impl Drop for ZipArtifact {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to remove spool artifact"
                );
            }
        }
    }
}

/// Pack a directory subtree into a zip artifact under `spool_dir`.
///
/// Blocking: call from a blocking-capable context. Traversal order follows the
/// node tree's listing order, so output is deterministic for a given tree.
pub fn pack(dir: &DirectoryNode, spool_dir: &Path) -> Result<ZipArtifact, PackError> {
    let timestamp = chrono::Utc::now().timestamp();
    let path = spool_dir.join(format!("{}-{}.zip", dir.name, timestamp));
    let start = std::time::Instant::now();

    let file = File::create(&path)?;
    let artifact = ZipArtifact {
        path,
        upload_name: format!("{}.zip", dir.name),
    };

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut entries = 0usize;
    add_children(&mut zip, dir, &dir.path, options, &mut entries)?;
    zip.finish()?;

    tracing::info!(
        path = %artifact.path.display(),
        entries,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Packed directory into zip artifact"
    );

    Ok(artifact)
}

fn add_children(
    zip: &mut ZipWriter<File>,
    dir: &DirectoryNode,
    root: &Path,
    options: FileOptions,
    entries: &mut usize,
) -> Result<(), PackError> {
    for child in &dir.children {
        match child {
            ContentNode::File(file) => {
                let name = entry_name(&file.path, root)?;
                zip.start_file(name, options)?;
                let mut source = File::open(&file.path)?;
                io::copy(&mut source, zip)?;
                *entries += 1;
            }
            ContentNode::Directory(subdir) => {
                // Explicit entry before descending keeps empty directories.
                let name = entry_name(&subdir.path, root)?;
                zip.add_directory(format!("{}/", name), options)?;
                *entries += 1;
                add_children(zip, subdir, root, options, entries)?;
            }
        }
    }
    Ok(())
}

/// Relative entry path with forward-slash separators on every platform.
fn entry_name(path: &Path, root: &Path) -> Result<String, PackError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PackError::OutsideRoot(path.to_path_buf()))?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
