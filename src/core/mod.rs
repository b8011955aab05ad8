//! Core domain logic
//!
//! Everything here is independent of the command line front end.
//!
//! # Architecture
//!
//! - **classifier**: Language detection, structural flags, category precedence
//! - **repository**: Fetch, walk and classify a repository
//! - **indexer**: Chunking and the embedding pipeline
//! - **embed**: Embedding providers
//! - **vector**: Vector index adapters
//! - **pool**: Bounded worker pool shared by both pipelines
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **services**: Unified service container and the `grok` run

pub mod classifier;
pub mod config;
pub mod embed;
pub mod error;
pub mod indexer;
pub mod pool;
pub mod repository;
pub mod services;
pub mod types;
pub mod vector;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{CopaceticError, Result};
pub use services::{Location, RunReport, Services};
