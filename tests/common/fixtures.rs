// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository fixture for creating synthetic test data
#[allow(dead_code)] // Used in integration tests
pub struct TestRepo {
    pub dir: TempDir,
    /// Relative paths in creation order
    pub files: Vec<PathBuf>,
}

impl TestRepo {
    /// The four-file repository from the README walkthrough
    #[allow(dead_code)] // Used in integration tests
    pub fn scenario() -> Self {
        Self::with_files(&[
            ("a.go", "package main"),
            (".gitignore", "node_modules"),
            ("README.md", "# Title"),
            ("vendor/lib.go", "..."),
        ])
    }

    /// A small mixed repository touching every bucket (12 files)
    #[allow(dead_code)] // Used in integration tests
    pub fn small() -> Self {
        Self::with_files(&[
            ("src/main.rs", "fn main() { println!(\"Hello\"); }"),
            ("src/lib.rs", "pub fn helper() -> u32 { 42 }"),
            (
                "src/utils.rs",
                "pub fn add(a: i32, b: i32) -> i32 { a + b }",
            ),
            ("README.md", "# Test Project\n\nThis is a test."),
            (
                "Cargo.toml",
                "[package]\nname = \"test\"\nversion = \"0.1.0\"",
            ),
            (".editorconfig", "root = true\n"),
            (
                "tests/test_main.rs",
                "#[test]\nfn it_works() { assert_eq!(2 + 2, 4); }",
            ),
            ("docs/api.md", "# API\n\n## Functions\n\n- `helper()`\n"),
            ("vendor/dep/dep.go", "package dep"),
            (
                "proto/api.pb.go",
                "// Code generated by protoc-gen-go. DO NOT EDIT.\npackage proto",
            ),
            ("web/app.min.js", "!function(){}();"),
            ("scripts/build.sh", "#!/bin/sh\necho build\n"),
        ])
    }

    /// `count` Go files with predictable content
    #[allow(dead_code)] // Used in integration tests
    pub fn many_go_files(count: usize) -> Self {
        let specs: Vec<(String, String)> = (0..count)
            .map(|i| {
                (
                    format!("pkg/m{i:03}/m{i:03}.go"),
                    format!("package m{i:03}\n\nfunc F{i}() int {{ return {i} }}\n"),
                )
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = specs
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        Self::with_files(&borrowed)
    }

    /// Create with custom text files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let specs: Vec<(&str, &[u8])> = files.iter().map(|(p, c)| (*p, c.as_bytes())).collect();
        Self::with_bytes(&specs)
    }

    /// Create with raw file contents
    pub fn with_bytes(files: &[(&str, &[u8])]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();

        for (path, content) in files {
            let full_path = dir.path().join(path);
            std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
            std::fs::write(&full_path, content).unwrap();
            paths.push(PathBuf::from(path));
        }

        Self { dir, files: paths }
    }

    /// Get path to the repository
    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
