//! Chunking and embedding pipeline.
//!
//! Indexes one category bucket at a time:
//! 1. Read each file's content
//! 2. Chunk it
//! 3. Embed every chunk in order
//! 4. Upsert the file's entries in one call
//!
//! Files are processed on the worker pool, one task per file, so
//! chunk order within a file is preserved and a failing file can be
//! named in the failure report.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use uuid::Uuid;

use crate::core::classifier::heuristics;
use crate::core::embed::Embedder;
use crate::core::error::{CopaceticError, FailureReport, FileFailure, Result};
use crate::core::indexer::Chunker;
use crate::core::pool::WorkerPool;
use crate::core::types::{Category, Chunk, File, IndexEntry, IndexStats};
use crate::core::vector::{IndexHandle, VectorIndex};

/// Everything an indexing run produced, failures included
#[derive(Debug)]
pub struct IndexingRun {
    pub stats: IndexStats,
    pub report: FailureReport,
}

impl IndexingRun {
    pub fn into_result(self) -> Result<IndexStats> {
        if self.report.is_empty() {
            Ok(self.stats)
        } else {
            Err(CopaceticError::IndexingFailed(self.report))
        }
    }
}

/// Orchestrates chunking, embedding and upserting
pub struct IndexingPipeline {
    pool: WorkerPool,
    chunker: Chunker,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl IndexingPipeline {
    pub fn new(
        pool: WorkerPool,
        chunker: Chunker,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            pool,
            chunker,
            embedder,
            index,
        }
    }

    /// Index `files` from `bucket` into `handle`, failing if any file failed
    pub async fn index_files(
        &self,
        root: &Path,
        files: &[File],
        bucket: Category,
        handle: &IndexHandle,
    ) -> Result<IndexStats> {
        self.index_collect(root, files, bucket, handle)
            .await
            .into_result()
    }

    /// Index `files`, keeping per-file failures alongside the stats
    pub async fn index_collect(
        &self,
        root: &Path,
        files: &[File],
        bucket: Category,
        handle: &IndexHandle,
    ) -> IndexingRun {
        let start = Instant::now();
        tracing::info!(
            "Indexing {} {} files into {}",
            files.len(),
            bucket,
            handle.name
        );

        let root: Arc<Path> = Arc::from(root);
        let handle = Arc::new(handle.clone());
        let run = self
            .pool
            .run(files.to_vec(), |file| {
                let job = FileJob {
                    root: Arc::clone(&root),
                    chunker: self.chunker.clone(),
                    embedder: Arc::clone(&self.embedder),
                    index: Arc::clone(&self.index),
                    handle: Arc::clone(&handle),
                    bucket,
                };
                async move { job.run(file).await }
            })
            .await;

        let mut stats = IndexStats {
            bucket: bucket.as_str().to_string(),
            ..IndexStats::default()
        };
        let mut report = FailureReport::default();

        for (idx, result) in run.completed {
            match result {
                Ok(chunk_count) => {
                    stats.files_indexed += 1;
                    stats.chunks_created += chunk_count;
                }
                Err(e) => {
                    tracing::warn!("Failed to index {:?}: {}", files[idx].path, e);
                    report.failed.push(FileFailure::new(files[idx].path.clone(), &e));
                }
            }
        }
        report.skipped = run
            .skipped
            .into_iter()
            .map(|idx| files[idx].path.clone())
            .collect();

        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing {} complete: {} files indexed, {} failed, \
             {} chunks created in {}ms",
            bucket,
            stats.files_indexed,
            report.failed.len(),
            stats.chunks_created,
            stats.duration_ms
        );

        IndexingRun { stats, report }
    }
}

/// Owned state for one file's task
struct FileJob {
    root: Arc<Path>,
    chunker: Chunker,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    handle: Arc<IndexHandle>,
    bucket: Category,
}

impl FileJob {
    /// Chunk, embed and upsert one file, returning its chunk count
    async fn run(self, file: File) -> Result<usize> {
        let bytes = tokio::fs::read(self.root.join(&file.path)).await?;
        // Offsets must index the file itself, so undecodable text is not rewritten
        let content = String::from_utf8(bytes)
            .map_err(|e| CopaceticError::InvalidEncoding(e.utf8_error().valid_up_to()))?;

        let chunks = self.chunker.chunk_text(&content, &file.path);
        if chunks.is_empty() {
            tracing::debug!("Skipping empty file: {:?}", file.path);
            return Ok(0);
        }

        let mut entries = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let embedding = self.embedder.embed(&chunk.text).await?;
            entries.push(build_entry(self.bucket, &file, chunk, embedding));
        }

        let count = entries.len();
        self.index.upsert(&self.handle, entries).await?;
        tracing::debug!("Indexed {:?} ({} chunks)", file.path, count);
        Ok(count)
    }
}

/// Stable id for a chunk: the same bucket, path and position always
/// map to the same entry
pub fn entry_id(bucket: Category, path: &Path, chunk_index: usize) -> String {
    let name = format!(
        "{}:{}:{}",
        bucket.as_str(),
        heuristics::normalize(path),
        chunk_index
    );
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

fn build_entry(bucket: Category, file: &File, chunk: Chunk, embedding: Vec<f32>) -> IndexEntry {
    let mut metadata = std::collections::BTreeMap::new();
    metadata.insert("type".to_string(), json!(bucket.as_str()));
    metadata.insert("path".to_string(), json!(heuristics::normalize(&file.path)));
    metadata.insert("language".to_string(), json!(file.language));
    metadata.insert("chunk_index".to_string(), json!(chunk.chunk_index));
    metadata.insert("start_offset".to_string(), json!(chunk.start_offset));
    metadata.insert("end_offset".to_string(), json!(chunk.end_offset));

    IndexEntry {
        id: entry_id(bucket, &file.path, chunk.chunk_index),
        content: chunk.text,
        embedding,
        metadata,
    }
}
