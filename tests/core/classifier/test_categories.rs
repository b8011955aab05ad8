// Classifier tests: languages and categories
//
// Exercises `classify` through the public crate surface with paths
// shaped the way the walker produces them (relative to the root).

use copacetic::core::classifier::{classify, ClassifyOutcome, Exclusion};
use copacetic::core::types::{Category, File, LanguageGroup, UNKNOWN_LANGUAGE};
use std::path::Path;

fn classified(path: &str, content: &[u8]) -> File {
    match classify(Path::new(path), content) {
        ClassifyOutcome::Classified(file) => file,
        other => panic!("{path}: expected a classified file, got {other:?}"),
    }
}

#[test]
fn test_language_labels() {
    for (path, content, language) in [
        ("src/lib.rs", &b"pub fn lib() {}"[..], "Rust"),
        ("scripts/build.sh", b"#!/bin/sh\necho hi\n", "Shell"),
        ("Cargo.toml", b"[package]\nname = \"x\"\n", "TOML"),
        ("README.md", b"# Title", "Markdown"),
        ("main.go", b"package main", "Go"),
    ] {
        assert_eq!(classified(path, content).language, language, "{path}");
    }
}

#[test]
fn test_language_never_empty() {
    for (path, content) in [
        ("mystery.zzz", &b"??"[..]),
        ("NOEXT", b"plain words"),
        ("empty", b""),
    ] {
        let file = classified(path, content);
        assert!(!file.language.is_empty());
        assert_eq!(file.language, UNKNOWN_LANGUAGE, "{path}");
        assert_eq!(file.language_group, LanguageGroup::Unknown);
    }
}

#[test]
fn test_nested_images_and_binaries_are_excluded() {
    assert!(matches!(
        classify(Path::new("assets/icons/logo.PNG"), b"\x89PNG"),
        ClassifyOutcome::Excluded(Exclusion::Image)
    ));
    assert!(matches!(
        classify(Path::new("bin/tool"), b"\x7fELF\x02\x01\x01\x00\x00"),
        ClassifyOutcome::Excluded(Exclusion::Binary)
    ));
}

#[test]
fn test_generated_beats_vendored() {
    let file = classified(
        "third_party/api/api.pb.go",
        b"// Code generated by protoc-gen-go. DO NOT EDIT.\npackage api",
    );
    assert!(file.flags.is_vendored);
    assert!(file.flags.is_generated);
    assert_eq!(file.category(), Category::Generated);
}

#[test]
fn test_configuration_only_at_root() {
    assert_eq!(
        classified("Makefile", b"all:\n\ttrue\n").category(),
        Category::Configuration
    );

    let nested = classified("deploy/values.yaml", b"replicas: 2\n");
    assert!(!nested.flags.is_configuration);
    assert_eq!(nested.category(), Category::Source);
}

#[test]
fn test_test_heuristics_use_file_shape() {
    assert_eq!(
        classified("pkg/server/server_test.go", b"package server").category(),
        Category::Test
    );
    assert_eq!(
        classified("src/contest.rs", b"fn main() {}").category(),
        Category::Source
    );
}
