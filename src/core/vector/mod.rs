//! Vector index collaborator boundary.
//!
//! The indexing pipeline depends only on [`VectorIndex`]: create a
//! named index once per run, then upsert batches of entries into it.
//! Similarity search is owned by the backend and is not part of
//! this interface.

pub mod memory;
pub mod qdrant;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::core::config::{VectorBackend, VectorConfig};
use crate::core::error::{CopaceticError, Result};
use crate::core::types::IndexEntry;

pub use memory::InMemoryVectorIndex;
pub use qdrant::QdrantIndex;

/// Options passed when an index is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexOptions {
    pub dimension: usize,
    pub namespace: String,
}

/// Opaque reference to a created index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexHandle {
    pub name: String,
    pub dimension: usize,
    pub namespace: String,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create `name` if missing and return a handle to it.
    ///
    /// Creating an index that already exists with the same dimension
    /// is not an error.
    async fn create_index(&self, name: &str, options: &IndexOptions) -> Result<IndexHandle>;

    /// Insert or replace entries by id. A call either stores every
    /// entry or none of them.
    async fn upsert(&self, handle: &IndexHandle, entries: Vec<IndexEntry>) -> Result<()>;
}

/// Build the backend selected by configuration
pub fn from_config(config: &VectorConfig) -> Result<Arc<dyn VectorIndex>> {
    match config.backend {
        VectorBackend::Memory => Ok(Arc::new(InMemoryVectorIndex::new())),
        VectorBackend::Qdrant => {
            let url = config.url.as_deref().ok_or_else(|| {
                CopaceticError::ConfigError("The qdrant backend needs vector.url".to_string())
            })?;
            Ok(Arc::new(QdrantIndex::new(url, config.api_key.clone())?))
        }
    }
}

/// Reject entries whose vectors do not fit the index
pub(crate) fn check_dimensions(handle: &IndexHandle, entries: &[IndexEntry]) -> Result<()> {
    if let Some(bad) = entries
        .iter()
        .find(|e| e.embedding.len() != handle.dimension)
    {
        return Err(CopaceticError::UpsertFailed(format!(
            "entry {} has {} dimensions, index {} expects {}",
            bad.id,
            bad.embedding.len(),
            handle.name,
            handle.dimension
        )));
    }
    Ok(())
}
