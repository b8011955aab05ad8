// Test helper functions

use async_trait::async_trait;
use copacetic::core::config::Config;
use copacetic::core::embed::{Embedder, HashEmbedder};
use copacetic::core::error::{CopaceticError, Result};
use copacetic::core::repository::RepositorySource;
use copacetic::core::services::Services;
use copacetic::core::types::IndexStats;
use copacetic::core::vector::InMemoryVectorIndex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Small embedding dimension used across integration tests
#[allow(dead_code)]
pub const TEST_DIMENSION: usize = 8;

/// Default config with test-friendly sizes
#[allow(dead_code)] // Used in integration tests
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.pool.size = 4;
    config.embedding.dimension = TEST_DIMENSION;
    config
}

/// Never reaches a network; fails every fetch
struct NoNetwork;

#[async_trait]
impl RepositorySource for NoNetwork {
    async fn fetch(&self, url: &str, _git_ref: &str, _dest: &Path) -> Result<PathBuf> {
        Err(CopaceticError::CloneFailed(format!(
            "network disabled in tests: {url}"
        )))
    }
}

/// Create test services backed by an inspectable in-memory index
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services(config: Config) -> (Services, Arc<InMemoryVectorIndex>) {
    let index = Arc::new(InMemoryVectorIndex::new());
    let services = Services::with_collaborators(
        config,
        Arc::new(HashEmbedder::new(TEST_DIMENSION)),
        index.clone(),
        Arc::new(NoNetwork),
    );
    (services, index)
}

/// Embedder that fails on any chunk containing `marker`
#[allow(dead_code)] // Used in integration tests
pub struct PoisonEmbedder {
    pub marker: &'static str,
    inner: HashEmbedder,
}

impl PoisonEmbedder {
    #[allow(dead_code)]
    pub fn new(marker: &'static str) -> Self {
        Self {
            marker,
            inner: HashEmbedder::new(TEST_DIMENSION),
        }
    }
}

#[async_trait]
impl Embedder for PoisonEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.contains(self.marker) {
            return Err(CopaceticError::EmbeddingFailed(format!(
                "refused chunk containing {}",
                self.marker
            )));
        }
        self.inner.embed(text).await
    }

    fn dimension(&self) -> usize {
        TEST_DIMENSION
    }

    fn model_name(&self) -> &str {
        "poison"
    }
}

/// Assert that index stats are valid
#[allow(dead_code)] // Used in integration tests
pub fn assert_valid_stats(stats: &IndexStats) {
    assert!(
        stats.files_indexed > 0,
        "Expected files_indexed > 0, got {}",
        stats.files_indexed
    );
    assert!(
        stats.chunks_created >= stats.files_indexed,
        "Expected chunks_created ({}) >= files_indexed ({})",
        stats.chunks_created,
        stats.files_indexed
    );
}
