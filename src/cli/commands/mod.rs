//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! specific CLI command.

pub mod classify;
pub mod completions;
pub mod config;
pub mod grok;

use clap::Args;

use crate::core::config::{split_list, Config};
use crate::core::pool::FailurePolicy;

// Re-export argument types for use in mod.rs
pub use classify::ClassifyArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use grok::GrokArgs;

/// Flags that override the pipeline section of the config
#[derive(Args, Debug, Default, Clone)]
pub struct PipelineArgs {
    /// Maximum files processed concurrently
    #[arg(long, short = 'j')]
    pub pool_size: Option<usize>,

    /// Per-file task deadline in seconds (0 disables)
    #[arg(long)]
    pub task_timeout: Option<u64>,

    /// Stop scheduling after the first failure, or run every file
    #[arg(long, value_parser = ["halt", "continue"])]
    pub failure_policy: Option<String>,

    /// Characters per chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// Category buckets to index, comma separated or repeated
    #[arg(long = "bucket", short = 'b')]
    pub buckets: Vec<String>,
}

impl PipelineArgs {
    /// Apply the flags that were given on top of `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(size) = self.pool_size {
            config.pool.size = size;
        }
        if let Some(timeout) = self.task_timeout {
            config.pool.task_timeout_sec = timeout;
        }
        if let Some(policy) = &self.failure_policy {
            config.pool.failure_policy = match policy.as_str() {
                "continue" => FailurePolicy::Continue,
                _ => FailurePolicy::Halt,
            };
        }
        if let Some(size) = self.chunk_size {
            config.indexing.chunk_size = size;
        }
        if let Some(overlap) = self.chunk_overlap {
            config.indexing.chunk_overlap = overlap;
        }
        if !self.buckets.is_empty() {
            config.indexing.buckets = self.buckets.iter().flat_map(|b| split_list(b)).collect();
        }
    }
}
