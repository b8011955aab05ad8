//! Error types and error handling for copacetic.
//!
//! A run fails in one of two ways: a fatal error that aborts the
//! run before a stage starts (traversal, clone, index creation), or
//! an aggregated per-file failure report from the classification or
//! indexing stage. The report always names every offending path.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for copacetic operations
pub type Result<T> = std::result::Result<T, CopaceticError>;

/// Main error type for copacetic
#[derive(Error, Debug)]
pub enum CopaceticError {
    #[error("Traversal failed for {path:?}: {message}")]
    TraversalFailed { path: PathBuf, message: String },

    #[error("Classification failed: {0}")]
    ClassificationFailed(FailureReport),

    #[error("Indexing failed: {0}")]
    IndexingFailed(FailureReport),

    #[error("Clone failed: {0}")]
    CloneFailed(String),

    #[error("Index creation failed: {0}")]
    IndexCreationFailed(String),

    #[error("Content is not valid UTF-8 (first invalid byte at offset {0})")]
    InvalidEncoding(usize),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Upsert failed: {0}")]
    UpsertFailed(String),

    #[error("Task timed out after {0:?}")]
    TaskTimedOut(Duration),

    #[error("Task aborted: {0}")]
    TaskAborted(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl CopaceticError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Errors that abort a run before the affected stage starts
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CopaceticError::TraversalFailed { .. }
                | CopaceticError::CloneFailed(_)
                | CopaceticError::IndexCreationFailed(_)
                | CopaceticError::ConfigError(_)
        )
    }

    /// Paths named by an aggregated per-file failure, empty otherwise
    pub fn failed_paths(&self) -> Vec<&PathBuf> {
        match self {
            CopaceticError::ClassificationFailed(report)
            | CopaceticError::IndexingFailed(report) => {
                report.failed.iter().map(|f| &f.path).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// One file that failed inside a pool run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    /// Path relative to the repository root
    pub path: PathBuf,

    /// Rendered cause
    pub reason: String,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, error: &CopaceticError) -> Self {
        Self {
            path: path.into(),
            reason: error.to_string(),
        }
    }
}

/// Aggregated outcome of the failed part of a pool run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// Files whose task ran and failed, in input order
    pub failed: Vec<FileFailure>,

    /// Files never scheduled because the pool halted after a failure
    pub skipped: Vec<PathBuf>,
}

impl FailureReport {
    pub fn is_empty(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file(s) failed", self.failed.len())?;
        for failure in &self.failed {
            write!(f, "; {}: {}", failure.path.display(), failure.reason)?;
        }
        if !self.skipped.is_empty() {
            write!(
                f,
                " ({} file(s) not attempted after the first failure)",
                self.skipped.len()
            )?;
        }
        Ok(())
    }
}
