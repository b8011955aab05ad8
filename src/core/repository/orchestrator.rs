//! Classification orchestrator.
//!
//! Fans the walked path list out across the worker pool, reads and
//! classifies each file, then merges the outcomes into a [`Source`]
//! in input order. Per-file read failures are collected into a
//! [`FailureReport`]; they never abort sibling files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::core::classifier::{self, ClassifyOutcome};
use crate::core::error::{CopaceticError, FailureReport, FileFailure, Result};
use crate::core::pool::WorkerPool;
use crate::core::types::Source;

/// Everything a classification run produced, failures included
#[derive(Debug)]
pub struct ClassificationRun {
    /// Snapshot built from every file that classified successfully
    pub source: Source,

    /// Files that failed or were never attempted
    pub report: FailureReport,
}

impl ClassificationRun {
    /// The snapshot, or the failure report if any file failed
    pub fn into_result(self) -> Result<Source> {
        if self.report.is_empty() {
            Ok(self.source)
        } else {
            Err(CopaceticError::ClassificationFailed(self.report))
        }
    }
}

/// Classifies a walked repository across a worker pool
#[derive(Debug, Clone)]
pub struct RepositoryClassifier {
    pool: WorkerPool,
}

impl RepositoryClassifier {
    pub fn new(pool: WorkerPool) -> Self {
        Self { pool }
    }

    /// Classify every path and fail if any file could not be read
    pub async fn classify_all(&self, root: &Path, paths: Vec<PathBuf>) -> Result<Source> {
        self.classify_collect(root, paths).await.into_result()
    }

    /// Classify every path, keeping successes alongside failures
    pub async fn classify_collect(&self, root: &Path, paths: Vec<PathBuf>) -> ClassificationRun {
        let start = Instant::now();
        let root: Arc<Path> = Arc::from(root);
        tracing::info!(
            "Classifying {} files with {} workers",
            paths.len(),
            self.pool.size()
        );

        let task_root = Arc::clone(&root);
        let run = self
            .pool
            .run(paths.clone(), move |path| {
                let root = Arc::clone(&task_root);
                async move { classify_file(&root, path).await }
            })
            .await;

        let mut source = Source::new(root.to_path_buf(), paths);
        let mut report = FailureReport::default();

        for (idx, result) in run.completed {
            let outcome = result.unwrap_or_else(|e| {
                ClassifyOutcome::Failed(FileFailure::new(source.files[idx].clone(), &e))
            });
            match outcome {
                ClassifyOutcome::Classified(file) => {
                    source.languages.record(&file.language);
                    let category = file.category();
                    tracing::debug!("{:?}: {} ({})", file.path, file.language, category);
                    source.bucket_mut(category).push(file);
                }
                ClassifyOutcome::Excluded(reason) => {
                    tracing::debug!("Excluded {:?} ({:?})", source.files[idx], reason);
                    source.excluded.push(source.files[idx].clone());
                }
                ClassifyOutcome::Failed(failure) => {
                    tracing::warn!("Failed to classify {:?}: {}", failure.path, failure.reason);
                    report.failed.push(failure);
                }
            }
        }

        report.skipped = run
            .skipped
            .into_iter()
            .map(|idx| source.files[idx].clone())
            .collect();

        tracing::info!(
            "Classification complete: {} classified, {} excluded, {} failed, \
             {} languages in {}ms",
            source.classified_count(),
            source.excluded.len(),
            report.failed.len(),
            source.languages.len(),
            start.elapsed().as_millis()
        );

        ClassificationRun { source, report }
    }
}

/// Read one file and classify it
async fn classify_file(root: &Path, path: PathBuf) -> Result<ClassifyOutcome> {
    let content = tokio::fs::read(root.join(&path)).await?;
    Ok(classifier::classify(&path, &content))
}
