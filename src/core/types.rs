//! Core data types for copacetic.
//!
//! Classified files, the language frequency table, the repository
//! snapshot with its category buckets, chunks and index entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::error::CopaceticError;

/// Label used when no language could be determined
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Coarse language family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageGroup {
    Programming,
    Markup,
    Data,
    Prose,
    Unknown,
}

impl LanguageGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageGroup::Programming => "programming",
            LanguageGroup::Markup => "markup",
            LanguageGroup::Data => "data",
            LanguageGroup::Prose => "prose",
            LanguageGroup::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LanguageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutually exclusive category bucket a classified file is filed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Source,
    Dotfiles,
    Vendored,
    Configuration,
    Generated,
    Documentation,
    Test,
}

impl Category {
    /// Every category, in bucket display order
    pub const ALL: [Category; 7] = [
        Category::Source,
        Category::Dotfiles,
        Category::Vendored,
        Category::Configuration,
        Category::Generated,
        Category::Documentation,
        Category::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Source => "source",
            Category::Dotfiles => "dotfiles",
            Category::Vendored => "vendored",
            Category::Configuration => "configuration",
            Category::Generated => "generated",
            Category::Documentation => "documentation",
            Category::Test => "test",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CopaceticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| {
                CopaceticError::ConfigError(format!(
                    "Unknown category '{s}'. Valid categories: source, dotfiles, vendored, \
                     configuration, generated, documentation, test"
                ))
            })
    }
}

/// Structural flags computed independently for each file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFlags {
    pub is_dotfile: bool,
    pub is_vendored: bool,
    pub is_configuration: bool,
    pub is_generated: bool,
    pub is_documentation: bool,
    pub is_test: bool,
}

/// One filesystem entry after classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Path relative to the repository root
    pub path: PathBuf,

    /// Language label, never empty
    pub language: String,

    /// Coarser language family
    pub language_group: LanguageGroup,

    /// Structural flags
    pub flags: FileFlags,
}

/// Frequency table of language label to file count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageSet(BTreeMap<String, usize>);

impl LanguageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more file for `language`, inserting the key on first use
    pub fn record(&mut self, language: &str) {
        *self.0.entry(language.to_string()).or_insert(0) += 1;
    }

    pub fn has(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }

    pub fn get(&self, language: &str) -> usize {
        self.0.get(language).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries ordered by descending count, then label
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries
    }
}

/// Repository snapshot: walked paths, language table and buckets
#[derive(Debug, Clone, Default, Serialize)]
pub struct Source {
    /// Root directory the paths are relative to
    pub root: PathBuf,

    /// Every walked path, in traversal order
    pub files: Vec<PathBuf>,

    pub languages: LanguageSet,

    pub source: Vec<File>,
    pub dotfiles: Vec<File>,
    pub vendored: Vec<File>,
    pub configuration: Vec<File>,
    pub generated: Vec<File>,
    pub documentation: Vec<File>,
    pub test: Vec<File>,

    /// Images and binaries left out of every bucket
    pub excluded: Vec<PathBuf>,
}

impl Source {
    pub fn new(root: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files,
            ..Self::default()
        }
    }

    pub fn bucket(&self, category: Category) -> &[File] {
        match category {
            Category::Source => &self.source,
            Category::Dotfiles => &self.dotfiles,
            Category::Vendored => &self.vendored,
            Category::Configuration => &self.configuration,
            Category::Generated => &self.generated,
            Category::Documentation => &self.documentation,
            Category::Test => &self.test,
        }
    }

    pub fn bucket_mut(&mut self, category: Category) -> &mut Vec<File> {
        match category {
            Category::Source => &mut self.source,
            Category::Dotfiles => &mut self.dotfiles,
            Category::Vendored => &mut self.vendored,
            Category::Configuration => &mut self.configuration,
            Category::Generated => &mut self.generated,
            Category::Documentation => &mut self.documentation,
            Category::Test => &mut self.test,
        }
    }

    /// Number of files placed in a bucket
    pub fn classified_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }

    /// Absolute path of a file in this snapshot
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// A contiguous slice of one file's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Source file path, relative to the repository root
    pub file_path: PathBuf,

    /// Byte offset where chunk starts in original file
    pub start_offset: usize,

    /// Byte offset where chunk ends in original file
    pub end_offset: usize,

    /// Sequential chunk number within the file
    pub chunk_index: usize,
}

/// The record submitted to a vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Stable id derived from bucket, path and chunk index
    pub id: String,

    /// Chunk text
    pub content: String,

    pub embedding: Vec<f32>,

    /// Always carries a `type` discriminator
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl IndexEntry {
    /// The `type` discriminator, if present
    pub fn kind(&self) -> Option<&str> {
        self.metadata.get("type").and_then(|v| v.as_str())
    }
}

/// Statistics from indexing one bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Bucket that was indexed
    pub bucket: String,

    /// Number of files successfully indexed
    pub files_indexed: usize,

    /// Total chunks upserted
    pub chunks_created: usize,

    /// Indexing duration in milliseconds
    pub duration_ms: u64,
}
