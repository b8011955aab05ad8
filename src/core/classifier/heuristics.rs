//! Path and content heuristics for the structural file flags.
//!
//! All path checks run against the path relative to the repository
//! root with `/` separators, so a checkout living under a directory
//! called `vendor` or `test` is not misfiled.

use once_cell::sync::Lazy;
use regex::RegexSet;
use std::path::Path;

use crate::core::classifier::language;

/// Extensions treated as images
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "tif", "psd",
];

/// Bytes inspected when sniffing for binary content
const BINARY_SNIFF_LEN: usize = 8000;

/// Lines inspected for generated-code markers
const GENERATED_HEADER_LINES: usize = 10;

/// File names that configure a project when they sit at the root
const CONFIGURATION_NAMES: &[&str] = &[
    "Makefile",
    "Dockerfile",
    "Jenkinsfile",
    "Gemfile",
    "Rakefile",
    "Pipfile",
    "Vagrantfile",
    "CMakeLists.txt",
    "go.mod",
    "setup.py",
    "requirements.txt",
];

static VENDOR_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(^|/)vendor/",
        r"(^|/)vendors?/",
        r"(^|/)node_modules/",
        r"(^|/)bower_components/",
        r"(^|/)third[-_]?party/",
        r"(^|/)3rd[-_]?party/",
        r"(^|/)[Ee]xternals?/",
        r"(^|/)Godeps/",
        r"(^|/)Carthage/",
        r"(^|/)Pods/",
        r"(^|/)\.yarn/",
        r"(^|/)cache/",
        r"(^|/)deps/",
        r"\.min\.(js|css)$",
        r"(^|/)jquery([^.]*)\.js$",
        r"(^|/)bootstrap([^/]*)\.(js|css)$",
    ])
    .expect("valid vendor patterns")
});

static DOCUMENTATION_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"^[Dd]ocs?/",
        r"(^|/)[Dd]ocumentation/",
        r"(^|/)[Jj]avadoc/",
        r"(^|/)man/",
        r"(^|/)[Ee]xamples?/",
        r"(^|/)[Dd]emos?/",
        r"(^|/)(?i:readme)(\.|$)",
        r"(^|/)(?i:changelog)(\.|$)",
        r"(^|/)(?i:changes)(\.|$)",
        r"(^|/)(?i:contributing)(\.|$)",
        r"(^|/)(?i:license|licence)(\.|$)",
        r"(^|/)(?i:copying)(\.|$)",
        r"(^|/)(?i:install)(\.md|\.txt|$)",
        r"(^|/)(?i:authors)(\.|$)",
        r"(^|/)(?i:code_of_conduct)(\.|$)",
    ])
    .expect("valid documentation patterns")
});

static TEST_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(^|/)tests?/",
        r"(^|/)__tests__/",
        r"(^|/)spec/",
        r"(^|/)testdata/",
        r"_test\.go$",
        r"(^|/)test_[^/]*\.py$",
        r"_test\.py$",
        r"_spec\.rb$",
        r"_test\.rb$",
        r"\.(test|spec)\.(js|jsx|ts|tsx|mjs)$",
        r"Tests?\.(java|kt|cs|scala)$",
        r"_test\.(c|cc|cpp|rs|exs)$",
    ])
    .expect("valid test patterns")
});

static GENERATED_PATH_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"\.pb\.go$",
        r"\.pb\.(cc|h)$",
        r"_pb2(_grpc)?\.py$",
        r"\.designer\.(cs|vb)$",
        r"\.(js|css)\.map$",
        r"(^|/)package-lock\.json$",
        r"(^|/)yarn\.lock$",
        r"(^|/)pnpm-lock\.yaml$",
        r"(^|/)Cargo\.lock$",
        r"(^|/)composer\.lock$",
        r"(^|/)poetry\.lock$",
        r"(^|/)Gemfile\.lock$",
        r"(^|/)go\.sum$",
        r"(^|/)zz_generated[^/]*\.go$",
        r"_generated\.(go|rs|ts)$",
    ])
    .expect("valid generated path patterns")
});

static GENERATED_MARKERS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"Code generated .* DO NOT EDIT",
        r"DO NOT EDIT",
        r"@generated",
        r"(?i)auto-?generated",
        r"Generated by the protocol buffer compiler",
    ])
    .expect("valid generated content markers")
});

/// Render a relative path with `/` separators for pattern matching
pub fn normalize(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// A NUL byte in the leading bytes marks content as binary
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(BINARY_SNIFF_LEN);
    content[..check_len].contains(&0)
}

pub fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.') && n != "." && n != "..")
        .unwrap_or(false)
}

pub fn is_vendored(normalized: &str) -> bool {
    VENDOR_PATTERNS.is_match(normalized)
}

pub fn is_documentation(normalized: &str) -> bool {
    DOCUMENTATION_PATTERNS.is_match(normalized)
}

pub fn is_test(normalized: &str) -> bool {
    TEST_PATTERNS.is_match(normalized)
}

/// Root-level data files and well-known manifests
pub fn is_configuration(path: &Path, language: &str) -> bool {
    let at_root = path.parent().map_or(true, |p| p.as_os_str().is_empty());
    if !at_root {
        return false;
    }

    let is_manifest = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| CONFIGURATION_NAMES.contains(&n))
        .unwrap_or(false);

    is_manifest || language::is_data_language(language)
}

pub fn is_generated(normalized: &str, content: &[u8]) -> bool {
    if GENERATED_PATH_PATTERNS.is_match(normalized) {
        return true;
    }

    let header = String::from_utf8_lossy(content);
    header
        .lines()
        .take(GENERATED_HEADER_LINES)
        .any(|line| GENERATED_MARKERS.is_match(line))
}
