//! Language and category classification for a single file.
//!
//! [`classify`] is a pure function of a path and its bytes. Images
//! and binaries are excluded rather than failed; everything else
//! gets a language label (never empty) and six independent flags.
//! The flags are folded into exactly one [`Category`] by walking
//! [`CATEGORY_PRECEDENCE`] top to bottom.

pub mod heuristics;
pub mod language;

use std::path::Path;

use crate::core::error::FileFailure;
use crate::core::types::{Category, File, FileFlags, UNKNOWN_LANGUAGE};

/// Why a file was left out of every bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Image,
    Binary,
}

/// Outcome of classifying one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyOutcome {
    Classified(File),
    Excluded(Exclusion),
    Failed(FileFailure),
}

/// Category predicates, first match wins; unmatched files are source
pub const CATEGORY_PRECEDENCE: &[(fn(&FileFlags) -> bool, Category)] = &[
    (is_dotfile, Category::Dotfiles),
    (is_configuration, Category::Configuration),
    (is_generated, Category::Generated),
    (is_vendored, Category::Vendored),
    (is_documentation, Category::Documentation),
    (is_test, Category::Test),
];

fn is_dotfile(flags: &FileFlags) -> bool {
    flags.is_dotfile
}

fn is_configuration(flags: &FileFlags) -> bool {
    flags.is_configuration
}

fn is_generated(flags: &FileFlags) -> bool {
    flags.is_generated
}

fn is_vendored(flags: &FileFlags) -> bool {
    flags.is_vendored
}

fn is_documentation(flags: &FileFlags) -> bool {
    flags.is_documentation
}

fn is_test(flags: &FileFlags) -> bool {
    flags.is_test
}

/// Fold a file's flags into its primary category
pub fn primary_category(flags: &FileFlags) -> Category {
    CATEGORY_PRECEDENCE
        .iter()
        .find(|(matches, _)| matches(flags))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Source)
}

/// Classify one file from its root-relative path and content
pub fn classify(path: &Path, content: &[u8]) -> ClassifyOutcome {
    if heuristics::is_image(path) {
        return ClassifyOutcome::Excluded(Exclusion::Image);
    }
    if heuristics::is_binary(content) {
        return ClassifyOutcome::Excluded(Exclusion::Binary);
    }

    let language = language::detect(path, content).unwrap_or(UNKNOWN_LANGUAGE);
    let normalized = heuristics::normalize(path);

    let flags = FileFlags {
        is_dotfile: heuristics::is_dotfile(path),
        is_vendored: heuristics::is_vendored(&normalized),
        is_configuration: heuristics::is_configuration(path, language),
        is_generated: heuristics::is_generated(&normalized, content),
        is_documentation: heuristics::is_documentation(&normalized),
        is_test: heuristics::is_test(&normalized),
    };

    ClassifyOutcome::Classified(File {
        path: path.to_path_buf(),
        language: language.to_string(),
        language_group: language::group_of(language),
        flags,
    })
}

impl File {
    /// The bucket this file belongs in
    pub fn category(&self) -> Category {
        primary_category(&self.flags)
    }
}
