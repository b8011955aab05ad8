//! Tests for CLI argument parsing
//!
//! Parses full command lines through `Cli::try_parse_from` and checks
//! that pipeline flags land on the config the commands run with.

use clap::Parser;
use copacetic::cli::{Cli, Commands, LogFormat, OutputFormat};
use copacetic::core::config::Config;
use copacetic::core::pool::FailurePolicy;
use copacetic::Location;
use std::path::PathBuf;

fn parse(argv: &[&str]) -> Cli {
    let mut full = vec!["copacetic"];
    full.extend_from_slice(argv);
    Cli::try_parse_from(full).unwrap()
}

#[test]
fn test_defaults() {
    let cli = parse(&["classify"]);
    assert_eq!(cli.format, OutputFormat::Human);
    assert_eq!(cli.log_format, LogFormat::Text);
    match cli.command {
        Commands::Classify(args) => {
            assert_eq!(args.path, PathBuf::from("."));
            assert!(!args.list);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_pipeline_flags_override_config() {
    let cli = parse(&[
        "grok",
        "https://example.com/acme.git",
        "-j",
        "6",
        "--task-timeout",
        "0",
        "--failure-policy",
        "continue",
        "--chunk-size",
        "256",
        "--chunk-overlap",
        "32",
        "-b",
        "source",
        "--bucket",
        "test,documentation",
    ]);
    let Commands::Grok(args) = cli.command else {
        panic!("expected grok");
    };

    let mut config = Config::default();
    args.pipeline.apply(&mut config);

    assert_eq!(config.pool.size, 6);
    assert_eq!(config.pool.task_timeout(), None);
    assert_eq!(config.pool.failure_policy, FailurePolicy::Continue);
    assert_eq!(config.indexing.chunk_size, 256);
    assert_eq!(config.indexing.chunk_overlap, 32);
    assert_eq!(
        config.indexing.buckets,
        vec!["source", "test", "documentation"]
    );
    config.validate().unwrap();
}

#[test]
fn test_unknown_failure_policy_rejected() {
    assert!(Cli::try_parse_from([
        "copacetic",
        "classify",
        "--failure-policy",
        "retry"
    ])
    .is_err());
}

#[test]
fn test_repo_and_path_conflict() {
    assert!(Cli::try_parse_from([
        "copacetic",
        "grok",
        "https://example.com/acme.git",
        "--path",
        "."
    ])
    .is_err());
}

#[test]
fn test_grok_remote_location() {
    let cli = parse(&["grok", "https://example.com/acme.git", "-r", "release"]);
    let Commands::Grok(args) = cli.command else {
        panic!("expected grok");
    };

    assert_eq!(
        args.location(&Config::default()).unwrap(),
        Location::Remote {
            url: "https://example.com/acme.git".to_string(),
            git_ref: "release".to_string(),
        }
    );
}

#[test]
fn test_grok_missing_path_is_error() {
    let cli = parse(&["grok", "--path", "/definitely/not/here"]);
    let Commands::Grok(args) = cli.command else {
        panic!("expected grok");
    };

    let err = args.location(&Config::default()).unwrap_err();
    assert!(err.to_string().contains("Invalid path"));
}

#[test]
fn test_show_config_and_completions_parse() {
    assert!(matches!(
        parse(&["show-config", "--path"]).command,
        Commands::ShowConfig(ref args) if args.path
    ));
    assert!(matches!(
        parse(&["completions", "zsh"]).command,
        Commands::Completions(_)
    ));
}
