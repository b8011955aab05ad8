//! UTF-8 safe text chunking.
//!
//! Chunk sizes are measured in characters, so a boundary never
//! splits a multi-byte sequence. Offsets stored on each chunk are
//! byte offsets into the original text and can be used to slice it
//! directly.
//!
//! # Example
//!
//! ```
//! use copacetic::indexer::Chunker;
//! use std::path::Path;
//!
//! let chunker = Chunker::new(1000, 0).unwrap();
//! let chunks = chunker.chunk_text("package main", Path::new("main.go"));
//! assert_eq!(chunks.len(), 1);
//! ```

use crate::core::error::{CopaceticError, Result};
use crate::core::types::Chunk;
use std::path::Path;

/// Splits text into fixed-size chunks with a configurable overlap.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Number of characters per chunk
    chunk_size: usize,

    /// Number of characters shared with the previous chunk
    overlap: usize,
}

impl Chunker {
    /// Create a chunker.
    ///
    /// Fails with `ConfigError` if `chunk_size` is 0 or if
    /// `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(CopaceticError::ConfigError(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(CopaceticError::ConfigError(
                "overlap must be < chunk_size".to_string(),
            ));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk text into overlapping segments.
    ///
    /// Chunks are ordered by offset. The first chunk starts at 0,
    /// the last one ends at `text.len()`, and each chunk starts
    /// `overlap` characters before its predecessor ends.
    ///
    /// ```
    /// use copacetic::indexer::Chunker;
    /// use std::path::Path;
    ///
    /// let chunker = Chunker::new(10, 2).unwrap();
    /// let text = "Hello 👋 World 🌍 Rust 🦀";
    /// for chunk in chunker.chunk_text(text, Path::new("test.txt")) {
    ///     assert_eq!(&text[chunk.start_offset..chunk.end_offset], chunk.text);
    /// }
    /// ```
    pub fn chunk_text(&self, text: &str, file_path: &Path) -> Vec<Chunk> {
        let char_indices: Vec<(usize, char)> = text.char_indices().collect();

        if char_indices.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut char_start_idx = 0;
        let step = self.chunk_size - self.overlap;

        while char_start_idx < char_indices.len() {
            let char_end_idx = (char_start_idx + self.chunk_size).min(char_indices.len());

            let byte_start = char_indices[char_start_idx].0;
            let byte_end = if char_end_idx < char_indices.len() {
                char_indices[char_end_idx].0
            } else {
                text.len()
            };

            chunks.push(Chunk {
                text: text[byte_start..byte_end].to_string(),
                file_path: file_path.to_path_buf(),
                start_offset: byte_start,
                end_offset: byte_end,
                chunk_index: chunks.len(),
            });

            // The tail is covered; another step would only repeat the overlap
            if char_end_idx == char_indices.len() {
                break;
            }
            char_start_idx += step;
        }

        chunks
    }
}

/// Rebuild the original text from ordered chunks by dropping each
/// chunk's overlap with its predecessor.
pub fn reassemble(chunks: &[Chunk]) -> String {
    let mut out = String::new();
    let mut covered = 0usize;
    for chunk in chunks {
        let skip = covered.saturating_sub(chunk.start_offset);
        out.push_str(&chunk.text[skip..]);
        covered = chunk.end_offset;
    }
    out
}
