//! Configuration management for copacetic.
//!
//! Configuration is loaded from a TOML file and environment
//! variables, with defaults for every setting. CLI flags are applied
//! on top by the caller before validation.

use crate::core::error::{CopaceticError, Result};
use crate::core::pool::{FailurePolicy, WorkerPool};
use crate::core::types::Category;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub vector: VectorConfig,
    #[serde(default)]
    pub git: GitConfig,
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    /// Maximum tasks in flight
    #[serde(default = "default_pool_size")]
    pub size: usize,

    /// Per-task deadline in seconds, 0 disables it
    #[serde(default = "default_task_timeout")]
    pub task_timeout_sec: u64,

    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    #[serde(default)]
    pub chunk_overlap: usize,

    /// Category buckets fed into the vector index
    #[serde(default = "default_buckets")]
    pub buckets: Vec<String>,

    #[serde(default = "default_index_name")]
    pub index_name: String,

    #[serde(default = "default_namespace")]
    pub namespace: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Offline feature hashing
    #[default]
    Hash,
    #[serde(rename = "openai")]
    OpenAi,
}

impl FromStr for EmbeddingProvider {
    type Err = CopaceticError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hash" => Ok(Self::Hash),
            "openai" => Ok(Self::OpenAi),
            other => Err(CopaceticError::ConfigError(format!(
                "Unknown embedding provider '{other}' (expected hash or openai)"
            ))),
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingProvider,

    #[serde(default = "default_model")]
    pub model: String,

    /// Vector length produced by the model
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Falls back to `OPENAI_API_KEY` when unset
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorBackend {
    #[default]
    Memory,
    Qdrant,
}

impl FromStr for VectorBackend {
    type Err = CopaceticError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "qdrant" => Ok(Self::Qdrant),
            other => Err(CopaceticError::ConfigError(format!(
                "Unknown vector backend '{other}' (expected memory or qdrant)"
            ))),
        }
    }
}

/// Vector index configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VectorConfig {
    #[serde(default)]
    pub backend: VectorBackend,

    /// Base URL of the backend service
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

/// Repository fetch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitConfig {
    /// Ref checked out when none is given
    #[serde(default = "default_ref")]
    pub default_ref: String,

    /// Clone depth, 0 for full history
    #[serde(default = "default_depth")]
    pub depth: u32,
}

/// The options the classification and indexing stages consume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub pool_size: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub buckets_to_index: Vec<Category>,
}

// Default value functions
fn default_pool_size() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_task_timeout() -> u64 {
    120
}

fn default_chunk_size() -> usize {
    1000
}

fn default_buckets() -> Vec<String> {
    vec![Category::Source.as_str().to_string()]
}

fn default_index_name() -> String {
    "copacetic".to_string()
}

fn default_namespace() -> String {
    "copacetic".to_string()
}

fn default_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_dimension() -> usize {
    1536
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_ref() -> String {
    "main".to_string()
}

fn default_depth() -> u32 {
    1
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: default_pool_size(),
            task_timeout_sec: default_task_timeout(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: 0,
            buckets: default_buckets(),
            index_name: default_index_name(),
            namespace: default_namespace(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            model: default_model(),
            dimension: default_dimension(),
            api_base: default_api_base(),
            api_key: None,
            request_timeout_sec: default_request_timeout(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            default_ref: default_ref(),
            depth: default_depth(),
        }
    }
}

impl PoolConfig {
    pub fn task_timeout(&self) -> Option<Duration> {
        (self.task_timeout_sec > 0).then(|| Duration::from_secs(self.task_timeout_sec))
    }

    /// Build a worker pool from these settings
    pub fn worker_pool(&self) -> WorkerPool {
        WorkerPool::new(self.size)
            .with_timeout(self.task_timeout())
            .with_policy(self.failure_policy)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CopaceticError::ConfigError(format!("Failed to read config file {path:?}: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. COPACETIC_CONFIG env var
    /// 2. XDG config file (~/.config/copacetic/config.toml)
    /// 3. Defaults
    ///
    /// Environment overrides are merged afterwards. Validation is
    /// left to the caller so CLI flags can be applied first.
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("COPACETIC_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else {
                Self::default()
            }
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        // Pool configuration
        if let Ok(size) = env::var("COPACETIC_POOL_SIZE") {
            if let Ok(s) = size.parse() {
                self.pool.size = s;
            }
        }
        if let Ok(timeout) = env::var("COPACETIC_TASK_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.pool.task_timeout_sec = t;
            }
        }
        if let Ok(policy) = env::var("COPACETIC_FAILURE_POLICY") {
            self.pool.failure_policy = policy.parse()?;
        }

        // Indexing configuration
        if let Ok(chunk_size) = env::var("COPACETIC_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.indexing.chunk_size = size;
            }
        }
        if let Ok(overlap) = env::var("COPACETIC_CHUNK_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.indexing.chunk_overlap = o;
            }
        }
        if let Ok(buckets) = env::var("COPACETIC_BUCKETS") {
            self.indexing.buckets = split_list(&buckets);
        }

        // Embedding and vector configuration
        if let Ok(provider) = env::var("COPACETIC_EMBEDDING_PROVIDER") {
            self.embedding.provider = provider.parse()?;
        }
        if let Ok(backend) = env::var("COPACETIC_VECTOR_BACKEND") {
            self.vector.backend = backend.parse()?;
        }
        if let Ok(url) = env::var("COPACETIC_VECTOR_URL") {
            self.vector.url = Some(url);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.pool.size == 0 {
            return Err(CopaceticError::ConfigError(
                "Pool size must be non-zero".to_string(),
            ));
        }

        if self.indexing.chunk_size == 0 {
            return Err(CopaceticError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.indexing.chunk_overlap >= self.indexing.chunk_size {
            return Err(CopaceticError::ConfigError(
                "Chunk overlap must be less than chunk size".to_string(),
            ));
        }

        self.buckets_to_index()?;

        if self.embedding.dimension == 0 {
            return Err(CopaceticError::ConfigError(
                "Embedding dimension must be non-zero".to_string(),
            ));
        }

        if self.vector.backend == VectorBackend::Qdrant && self.vector.url.is_none() {
            return Err(CopaceticError::ConfigError(
                "The qdrant backend needs vector.url".to_string(),
            ));
        }

        Ok(())
    }

    /// Parsed bucket names, deduplicated in configured order
    pub fn buckets_to_index(&self) -> Result<Vec<Category>> {
        let mut buckets = Vec::new();
        for name in &self.indexing.buckets {
            let category: Category = name.parse()?;
            if !buckets.contains(&category) {
                buckets.push(category);
            }
        }
        Ok(buckets)
    }

    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        Ok(PipelineOptions {
            pool_size: self.pool.size,
            chunk_size: self.indexing.chunk_size,
            chunk_overlap: self.indexing.chunk_overlap,
            buckets_to_index: self.buckets_to_index()?,
        })
    }

    /// Log configuration (secrets are never logged)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Pool size: {}", self.pool.size);
        tracing::info!("  Task timeout: {}s", self.pool.task_timeout_sec);
        tracing::info!("  Failure policy: {}", self.pool.failure_policy);
        tracing::info!("  Chunk size: {} chars", self.indexing.chunk_size);
        tracing::info!("  Chunk overlap: {} chars", self.indexing.chunk_overlap);
        tracing::info!("  Buckets: {}", self.indexing.buckets.join(", "));
        tracing::info!(
            "  Embedding: {:?} {} ({} dims)",
            self.embedding.provider,
            self.embedding.model,
            self.embedding.dimension
        );
        tracing::info!("  Vector backend: {:?}", self.vector.backend);
    }
}

/// Split a comma separated list, dropping empty items
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
