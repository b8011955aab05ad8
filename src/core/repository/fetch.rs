//! Repository source collaborator.
//!
//! Produces a populated local directory before the walker runs.
//! `GitCli` clones with the system `git` binary; a failed clone is
//! fatal to the run.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::core::error::{CopaceticError, Result};

/// Something that can materialise a repository on local disk
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Clone `url` at `git_ref` into `dest` and return the checkout path
    async fn fetch(&self, url: &str, git_ref: &str, dest: &Path) -> Result<PathBuf>;
}

/// Clones through the `git` command line
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Path or name of the git binary
    program: String,

    /// Shallow clone depth, 0 for full history
    depth: u32,
}

impl GitCli {
    pub fn new(depth: u32) -> Self {
        Self {
            program: "git".to_string(),
            depth,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments for `git clone`, without the program name
    pub fn clone_args(&self, url: &str, git_ref: &str, dest: &Path) -> Vec<String> {
        let mut args = vec!["clone".to_string(), "--quiet".to_string()];
        if self.depth > 0 {
            args.push("--depth".to_string());
            args.push(self.depth.to_string());
        }
        if !git_ref.is_empty() {
            args.push("--branch".to_string());
            args.push(git_ref.to_string());
        }
        args.push("--".to_string());
        args.push(url.to_string());
        args.push(dest.to_string_lossy().into_owned());
        args
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait]
impl RepositorySource for GitCli {
    async fn fetch(&self, url: &str, git_ref: &str, dest: &Path) -> Result<PathBuf> {
        if url.is_empty() {
            return Err(CopaceticError::CloneFailed(
                "repository URL cannot be empty".to_string(),
            ));
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::info!("Cloning {} ({}) into {:?}", url, git_ref, dest);

        let output = Command::new(&self.program)
            .args(self.clone_args(url, git_ref, dest))
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .await
            .map_err(|e| CopaceticError::CloneFailed(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CopaceticError::CloneFailed(format!(
                "git clone of {url} at '{git_ref}' exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(dest.to_path_buf())
    }
}
