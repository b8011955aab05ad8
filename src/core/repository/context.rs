//! Run-scoped workspace.
//!
//! A `RunContext` owns the temporary directory a repository is
//! cloned into. Dropping the context removes the directory, so
//! cleanup happens on every exit path.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::core::error::Result;

/// Temporary workspace for one run
#[derive(Debug)]
pub struct RunContext {
    workspace: TempDir,
}

impl RunContext {
    /// Create a fresh workspace under the system temp directory
    pub fn new() -> Result<Self> {
        let workspace = tempfile::Builder::new().prefix("copacetic-").tempdir()?;
        tracing::debug!("Created run workspace {:?}", workspace.path());
        Ok(Self { workspace })
    }

    /// Create a fresh workspace under `parent`
    pub fn new_in(parent: impl AsRef<Path>) -> Result<Self> {
        let workspace = tempfile::Builder::new()
            .prefix("copacetic-")
            .tempdir_in(parent)?;
        Ok(Self { workspace })
    }

    pub fn workspace(&self) -> &Path {
        self.workspace.path()
    }

    /// Where a cloned repository lands inside the workspace
    pub fn checkout_dir(&self) -> PathBuf {
        self.workspace.path().join("grok").join("repo")
    }

    /// Remove the workspace now, reporting any cleanup error
    pub fn close(self) -> Result<()> {
        let path = self.workspace.path().to_path_buf();
        self.workspace.close()?;
        tracing::debug!("Removed run workspace {:?}", path);
        Ok(())
    }
}
