//! Chunking and embedding.
//!
//! - UTF-8 safe character-based chunking with optional overlap
//! - A pooled pipeline that embeds chunks and upserts them into a
//!   vector index, one task per file

pub mod chunker;
pub mod pipeline;

pub use chunker::Chunker;
pub use pipeline::{IndexingPipeline, IndexingRun};
