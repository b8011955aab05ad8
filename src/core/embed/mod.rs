//! Embedding collaborator boundary.
//!
//! The indexing pipeline only sees [`Embedder`]. Two providers ship
//! with the crate: a deterministic feature-hashing embedder that
//! needs no network, and an OpenAI-compatible HTTP client.

pub mod hash;
pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::config::{EmbeddingConfig, EmbeddingProvider};
use crate::core::error::Result;

pub use hash::HashEmbedder;
pub use openai::OpenAiEmbedder;

/// Turns a chunk of text into a vector
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Length of every vector this embedder produces
    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

/// Build the embedder selected by configuration
pub fn from_config(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>> {
    match config.provider {
        EmbeddingProvider::Hash => Ok(Arc::new(HashEmbedder::new(config.dimension))),
        EmbeddingProvider::OpenAi => Ok(Arc::new(OpenAiEmbedder::from_config(config)?)),
    }
}
