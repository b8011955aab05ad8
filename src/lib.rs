//! Copacetic - repository classification and vector indexing
//!
//! Walks a source repository, classifies every file by language and
//! category, and feeds selected buckets through a chunking and
//! embedding pipeline into a vector index.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - classifier (language and category detection)
//!   - repository (fetch, walk, concurrent classification)
//!   - indexer (chunking, embedding pipeline)
//!   - embed, vector (collaborator boundaries and adapters)
//!   - pool (bounded fan-out/fan-in)
//!   - config, error, types, xdg, services
//!
//! - **cli**: Command line adapter (depends on core)
//!
//! # Key Features
//!
//! - Deterministic bucket order regardless of task completion order
//! - Per-file failure reports that name every offending path
//! - UTF-8 safe chunking (character-based, never panics)
//! - Offline hash embeddings or any OpenAI-compatible endpoint

// Core domain logic
pub mod core;

// Command line adapter
pub mod cli;

// Re-export commonly used modules and types for convenience
pub use core::classifier;
pub use core::config::Config;
pub use core::error::{CopaceticError, Result};
pub use core::indexer;
pub use core::services::{Location, RunReport, Services};
pub use core::types::*;
