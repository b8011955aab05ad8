// End-to-end indexing tests
//
// Runs the full walk, classify and index flow over local fixtures
// and inspects the in-memory index afterwards.

use crate::common::{assert_valid_stats, create_test_services, test_config, TestRepo};
use copacetic::core::types::Category;
use copacetic::Location;
use std::collections::BTreeSet;

fn local(repo: &TestRepo) -> Location {
    Location::Local(repo.path().to_path_buf())
}

#[tokio::test]
async fn test_default_config_indexes_source_only() {
    let repo = TestRepo::small();
    let (services, index) = create_test_services(test_config());

    let report = services.grok(&local(&repo)).await.unwrap();

    assert_eq!(report.files_walked, 12);
    assert_eq!(report.classified, 12);
    assert_eq!(report.indexed.len(), 1);
    assert_eq!(report.indexed[0].bucket, "source");
    assert_eq!(report.indexed[0].files_indexed, 4);
    assert_valid_stats(&report.indexed[0]);

    let entries = index.entries("copacetic");
    assert_eq!(entries.len(), 4);
    assert!(entries.iter().all(|e| e.kind() == Some("source")));
}

#[tokio::test]
async fn test_several_buckets_share_one_index() {
    let repo = TestRepo::small();
    let mut config = test_config();
    config.indexing.buckets = vec![
        "source".to_string(),
        "documentation".to_string(),
        "test".to_string(),
    ];
    let (services, index) = create_test_services(config);

    let report = services.grok(&local(&repo)).await.unwrap();

    let buckets: Vec<&str> = report.indexed.iter().map(|s| s.bucket.as_str()).collect();
    assert_eq!(buckets, ["source", "documentation", "test"]);
    for stats in &report.indexed {
        assert_valid_stats(stats);
    }

    let entries = index.entries("copacetic");
    assert_eq!(entries.len(), 4 + 2 + 1);

    let kinds: BTreeSet<&str> = entries.iter().filter_map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        BTreeSet::from([
            Category::Documentation.as_str(),
            Category::Source.as_str(),
            Category::Test.as_str(),
        ])
    );

    let docs: BTreeSet<&str> = entries
        .iter()
        .filter(|e| e.kind() == Some("documentation"))
        .filter_map(|e| e.metadata["path"].as_str())
        .collect();
    assert_eq!(docs, BTreeSet::from(["README.md", "docs/api.md"]));
}

#[tokio::test]
async fn test_report_bucket_counts_cover_every_category() {
    let repo = TestRepo::small();
    let (services, _index) = create_test_services(test_config());

    let report = services.grok(&local(&repo)).await.unwrap();

    assert_eq!(report.buckets.len(), Category::ALL.len());
    assert_eq!(report.buckets["source"], 4);
    assert_eq!(report.buckets["vendored"], 2);
    assert_eq!(report.buckets.values().sum::<usize>(), report.classified);
    assert_eq!(report.languages.total(), report.classified);
}

#[tokio::test]
async fn test_reindexing_is_idempotent() {
    let repo = TestRepo::many_go_files(25);
    let mut config = test_config();
    config.indexing.chunk_size = 16;
    let (services, index) = create_test_services(config);

    let first = services.grok(&local(&repo)).await.unwrap();
    let after_first = index.entries("copacetic");

    let second = services.grok(&local(&repo)).await.unwrap();
    let after_second = index.entries("copacetic");

    assert_eq!(first.indexed[0].files_indexed, 25);
    assert_eq!(
        first.indexed[0].chunks_created,
        second.indexed[0].chunks_created
    );
    assert_eq!(after_first, after_second);
    assert_eq!(after_first.len(), first.indexed[0].chunks_created);
}

#[tokio::test]
async fn test_empty_bucket_is_reported_with_zero_counts() {
    let repo = TestRepo::scenario();
    let mut config = test_config();
    config.indexing.buckets = vec!["generated".to_string()];
    let (services, index) = create_test_services(config);

    let report = services.grok(&local(&repo)).await.unwrap();

    assert_eq!(report.indexed.len(), 1);
    assert_eq!(report.indexed[0].files_indexed, 0);
    assert_eq!(report.indexed[0].chunks_created, 0);
    assert!(index.is_empty("copacetic"));
}

#[tokio::test]
async fn test_unknown_bucket_is_config_error() {
    let repo = TestRepo::scenario();
    let mut config = test_config();
    config.indexing.buckets = vec!["sources".to_string()];
    let (services, index) = create_test_services(config);

    let err = services.grok(&local(&repo)).await.unwrap_err();

    assert!(err.is_fatal());
    assert!(err.to_string().contains("sources"));
    assert!(index.is_empty("copacetic"));
}
