//! Unified service container for copacetic.
//!
//! Wires configuration to the collaborators (repository source,
//! embedder, vector index) and runs the end-to-end `grok` flow:
//! fetch, walk, classify, then index each configured bucket.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::core::config::Config;
use crate::core::embed::{self, Embedder};
use crate::core::error::{CopaceticError, Result};
use crate::core::indexer::{Chunker, IndexingPipeline};
use crate::core::repository::{
    FileWalker, GitCli, RepositoryClassifier, RepositorySource, RunContext,
};
use crate::core::types::{Category, IndexStats, LanguageSet, Source};
use crate::core::vector::{self, IndexOptions, VectorIndex};

/// Where the repository to ingest comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Clone `url` at `git_ref` into a run workspace
    Remote { url: String, git_ref: String },
    /// Use an existing directory as-is
    Local(PathBuf),
}

impl Location {
    pub fn describe(&self) -> String {
        match self {
            Location::Remote { url, git_ref } => format!("{url}@{git_ref}"),
            Location::Local(path) => path.display().to_string(),
        }
    }
}

/// Summary of one `grok` run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub location: String,
    pub started_at: DateTime<Utc>,
    pub files_walked: usize,
    pub classified: usize,
    pub excluded: usize,
    pub languages: LanguageSet,
    /// File count per category bucket
    pub buckets: BTreeMap<String, usize>,
    /// Empty when no buckets are configured for indexing
    pub indexed: Vec<IndexStats>,
    pub duration_ms: u64,
}

/// Unified services container
#[derive(Clone)]
pub struct Services {
    pub config: Arc<Config>,
    pub embedder: Arc<dyn Embedder>,
    pub index: Arc<dyn VectorIndex>,
    pub repository: Arc<dyn RepositorySource>,
}

impl Services {
    /// Validate `config` and build the collaborators it selects
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let embedder = embed::from_config(&config.embedding)?;
        let index = vector::from_config(&config.vector)?;
        let repository = Arc::new(GitCli::new(config.git.depth));
        Ok(Self::with_collaborators(config, embedder, index, repository))
    }

    /// Assemble services around explicit collaborators
    pub fn with_collaborators(
        config: Config,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        repository: Arc<dyn RepositorySource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            embedder,
            index,
            repository,
        }
    }

    /// Walk and classify a local directory
    pub async fn classify(&self, root: &Path) -> Result<Source> {
        let paths = walk(root).await?;
        let classifier = RepositoryClassifier::new(self.config.pool.worker_pool());
        classifier.classify_all(root, paths).await
    }

    /// Fetch, classify and index a repository
    pub async fn grok(&self, location: &Location) -> Result<RunReport> {
        let started_at = Utc::now();
        let start = Instant::now();
        let buckets_to_index = self.config.buckets_to_index()?;

        // Keeps the clone alive until the run ends
        let mut context = None;
        let root = match location {
            Location::Local(path) => path.clone(),
            Location::Remote { url, git_ref } => {
                let ctx = RunContext::new()?;
                let checkout = self
                    .repository
                    .fetch(url, git_ref, &ctx.checkout_dir())
                    .await?;
                context = Some(ctx);
                checkout
            }
        };

        let source = self.classify(&root).await?;

        let mut indexed = Vec::with_capacity(buckets_to_index.len());
        if !buckets_to_index.is_empty() {
            let handle = self
                .index
                .create_index(
                    &self.config.indexing.index_name,
                    &IndexOptions {
                        dimension: self.embedder.dimension(),
                        namespace: self.config.indexing.namespace.clone(),
                    },
                )
                .await?;

            let pipeline = IndexingPipeline::new(
                self.config.pool.worker_pool(),
                Chunker::new(
                    self.config.indexing.chunk_size,
                    self.config.indexing.chunk_overlap,
                )?,
                Arc::clone(&self.embedder),
                Arc::clone(&self.index),
            );

            for bucket in buckets_to_index {
                let stats = pipeline
                    .index_files(&source.root, source.bucket(bucket), bucket, &handle)
                    .await?;
                indexed.push(stats);
            }
        }

        if let Some(ctx) = context {
            ctx.close()?;
        }

        let report = RunReport {
            location: location.describe(),
            started_at,
            files_walked: source.files.len(),
            classified: source.classified_count(),
            excluded: source.excluded.len(),
            buckets: Category::ALL
                .iter()
                .map(|c| (c.as_str().to_string(), source.bucket(*c).len()))
                .collect(),
            languages: source.languages,
            indexed,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Run complete: {} files walked, {} classified, {} excluded in {}ms",
            report.files_walked,
            report.classified,
            report.excluded,
            report.duration_ms
        );
        Ok(report)
    }
}

/// Walk `root` off the async runtime
async fn walk(root: &Path) -> Result<Vec<PathBuf>> {
    let owned = root.to_path_buf();
    tokio::task::spawn_blocking(move || FileWalker::new().collect_files(&owned))
        .await
        .map_err(|e| CopaceticError::TaskAborted(e.to_string()))?
}
