//! Repository walker.
//!
//! Enumerates every regular file under a root directory, skipping
//! version-control metadata. Traversal is single-threaded and sorted
//! by file name so a static tree always yields the same order.
//! Unlike the classification stage, any traversal error aborts the
//! walk.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{CopaceticError, Result};

/// Directory names holding version-control metadata
const VCS_DIRS: &[&str] = &[".git"];

/// File system walker producing root-relative paths
#[derive(Debug, Clone, Default)]
pub struct FileWalker {
    /// Follow symbolic links while walking
    follow_links: bool,
}

impl FileWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collect all regular files below `root`
    ///
    /// # Returns
    ///
    /// Paths relative to `root`, in deterministic traversal order,
    /// or `TraversalFailed` if the root or any entry below it cannot
    /// be read.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let metadata = std::fs::metadata(root).map_err(|e| CopaceticError::TraversalFailed {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if !metadata.is_dir() {
            return Err(CopaceticError::TraversalFailed {
                path: root.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_vcs_metadata(e))
        {
            let entry = entry.map_err(|e| CopaceticError::TraversalFailed {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| CopaceticError::TraversalFailed {
                    path: entry.path().to_path_buf(),
                    message: e.to_string(),
                })?;
            files.push(relative.to_path_buf());
        }

        tracing::debug!("Walked {:?}: {} files", root, files.len());
        Ok(files)
    }
}

/// Version-control metadata entries are pruned with everything below them
fn is_vcs_metadata(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| VCS_DIRS.contains(&name))
            .unwrap_or(false)
}
