//! Process-local vector index.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::core::error::{CopaceticError, Result};
use crate::core::types::IndexEntry;
use crate::core::vector::{check_dimensions, IndexHandle, IndexOptions, VectorIndex};

struct Collection {
    dimension: usize,
    entries: BTreeMap<String, IndexEntry>,
}

/// Index held in memory for the lifetime of the process.
///
/// Entries are keyed by id so re-indexing the same chunk replaces
/// the previous entry.
#[derive(Default)]
pub struct InMemoryVectorIndex {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries stored under `name`, ordered by id
    pub fn entries(&self, name: &str) -> Vec<IndexEntry> {
        self.collections
            .read()
            .ok()
            .and_then(|cols| {
                cols.get(name)
                    .map(|c| c.entries.values().cloned().collect())
            })
            .unwrap_or_default()
    }

    /// Number of entries stored under `name`
    pub fn len(&self, name: &str) -> usize {
        self.collections
            .read()
            .ok()
            .and_then(|cols| cols.get(name).map(|c| c.entries.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, name: &str) -> bool {
        self.len(name) == 0
    }
}

impl std::fmt::Debug for InMemoryVectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryVectorIndex").finish_non_exhaustive()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn create_index(&self, name: &str, options: &IndexOptions) -> Result<IndexHandle> {
        let mut cols = self
            .collections
            .write()
            .map_err(|e| CopaceticError::IndexCreationFailed(e.to_string()))?;

        let col = cols.entry(name.to_string()).or_insert_with(|| Collection {
            dimension: options.dimension,
            entries: BTreeMap::new(),
        });

        if col.dimension != options.dimension {
            return Err(CopaceticError::IndexCreationFailed(format!(
                "index {} exists with {} dimensions, requested {}",
                name, col.dimension, options.dimension
            )));
        }

        Ok(IndexHandle {
            name: name.to_string(),
            dimension: options.dimension,
            namespace: options.namespace.clone(),
        })
    }

    async fn upsert(&self, handle: &IndexHandle, entries: Vec<IndexEntry>) -> Result<()> {
        check_dimensions(handle, &entries)?;

        let mut cols = self
            .collections
            .write()
            .map_err(|e| CopaceticError::UpsertFailed(e.to_string()))?;
        let col = cols.get_mut(&handle.name).ok_or_else(|| {
            CopaceticError::UpsertFailed(format!("index {} not found", handle.name))
        })?;

        for entry in entries {
            col.entries.insert(entry.id.clone(), entry);
        }
        Ok(())
    }
}
