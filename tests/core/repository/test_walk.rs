// Walker tests
//
// Validates root-relative paths, stable ordering and pruning of
// version-control metadata.

use crate::common::TestRepo;
use copacetic::core::error::CopaceticError;
use copacetic::core::repository::FileWalker;
use std::path::PathBuf;

#[test]
fn test_walk_order_is_sorted_and_stable() {
    let repo = TestRepo::small();

    let first = FileWalker::new().collect_files(repo.path()).unwrap();
    let second = FileWalker::new().collect_files(repo.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        [
            ".editorconfig",
            "Cargo.toml",
            "README.md",
            "docs/api.md",
            "proto/api.pb.go",
            "scripts/build.sh",
            "src/lib.rs",
            "src/main.rs",
            "src/utils.rs",
            "tests/test_main.rs",
            "vendor/dep/dep.go",
            "web/app.min.js",
        ]
        .iter()
        .map(PathBuf::from)
        .collect::<Vec<_>>()
    );
}

#[test]
fn test_walk_returns_relative_paths() {
    let repo = TestRepo::many_go_files(5);

    let files = FileWalker::new().collect_files(repo.path()).unwrap();

    assert_eq!(files.len(), 5);
    for file in &files {
        assert!(file.is_relative(), "{file:?}");
        assert!(repo.path().join(file).is_file());
    }
}

#[test]
fn test_git_directory_is_pruned() {
    let repo = TestRepo::with_files(&[
        ("main.go", "package main"),
        (".git/HEAD", "ref: refs/heads/main"),
        (".git/objects/ab/cdef", "blob"),
        (".github/workflows/ci.yml", "on: push"),
    ]);

    let files = FileWalker::new().collect_files(repo.path()).unwrap();

    assert_eq!(
        files,
        vec![
            PathBuf::from(".github/workflows/ci.yml"),
            PathBuf::from("main.go")
        ]
    );
}

#[test]
fn test_empty_directory_yields_nothing() {
    let repo = TestRepo::with_files(&[]);
    let files = FileWalker::new().collect_files(repo.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_missing_root_fails_traversal() {
    let repo = TestRepo::scenario();
    let missing = repo.path().join("nope");

    let err = FileWalker::new().collect_files(&missing).unwrap_err();

    match err {
        CopaceticError::TraversalFailed { path, .. } => assert_eq!(path, missing),
        other => panic!("expected TraversalFailed, got {other:?}"),
    }
}

#[test]
fn test_file_root_fails_traversal() {
    let repo = TestRepo::scenario();
    let err = FileWalker::new()
        .collect_files(&repo.path().join("a.go"))
        .unwrap_err();
    assert!(matches!(err, CopaceticError::TraversalFailed { .. }));
    assert!(err.is_fatal());
}
