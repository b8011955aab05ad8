//! Tests for the grok CLI command
//!
//! Only local directories are exercised; the default collaborators are
//! the feature-hash embedder and the in-memory index, so nothing here
//! touches the network.

use crate::cli::test_helpers::{cli_test_config, no_overrides};
use crate::common::TestRepo;
use copacetic::cli::commands::grok::{execute, GrokArgs};
use copacetic::cli::commands::PipelineArgs;
use copacetic::cli::OutputFormat;

fn local_args(repo: &TestRepo, pipeline: PipelineArgs) -> GrokArgs {
    GrokArgs {
        repo: None,
        path: Some(repo.path().to_path_buf()),
        git_ref: None,
        pipeline,
        quiet: true,
    }
}

#[tokio::test]
async fn test_grok_local_human() {
    let repo = TestRepo::small();
    let args = local_args(&repo, no_overrides());

    let result = execute(args, cli_test_config(), OutputFormat::Human).await;
    assert!(result.is_ok(), "Grok should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_grok_local_json_without_buckets() {
    let repo = TestRepo::scenario();
    let mut config = cli_test_config();
    config.indexing.buckets.clear();

    let result = execute(local_args(&repo, no_overrides()), config, OutputFormat::Json).await;
    assert!(result.is_ok(), "Grok should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_grok_rejects_invalid_chunking() {
    let repo = TestRepo::scenario();
    let mut config = cli_test_config();
    let pipeline = PipelineArgs {
        chunk_size: Some(8),
        chunk_overlap: Some(8),
        ..PipelineArgs::default()
    };
    pipeline.apply(&mut config);

    let err = execute(local_args(&repo, pipeline), config, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("overlap"), "{err}");
}

#[tokio::test]
async fn test_grok_path_must_be_directory() {
    let repo = TestRepo::scenario();
    let args = GrokArgs {
        path: Some(repo.path().join("a.go")),
        ..local_args(&repo, no_overrides())
    };

    let err = execute(args, cli_test_config(), OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not a directory"));
}
