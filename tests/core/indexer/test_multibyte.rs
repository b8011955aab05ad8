// UTF-8 safety tests: multi-byte characters
//
// Chunk boundaries are counted in characters, so emoji and CJK text
// must never be split mid-character and offsets must slice the
// original content exactly.

use crate::common::{create_test_services, test_config, TestRepo};
use copacetic::core::indexer::chunker::reassemble;
use copacetic::core::indexer::Chunker;
use copacetic::core::pool::FailurePolicy;
use copacetic::Location;
use std::path::{Path, PathBuf};

const MIXED: &str = "// 🚀 Launch - 启动函数\nfn main() {\n    println!(\"Hello 世界! 🌍\");\n}\n";

#[test]
fn test_chunk_boundaries_fall_on_char_boundaries() {
    for size in [1, 2, 3, 5, 7, 13] {
        let chunker = Chunker::new(size, 0).unwrap();
        let chunks = chunker.chunk_text(MIXED, Path::new("mixed.rs"));

        for chunk in &chunks {
            assert!(MIXED.is_char_boundary(chunk.start_offset));
            assert!(MIXED.is_char_boundary(chunk.end_offset));
            assert_eq!(&MIXED[chunk.start_offset..chunk.end_offset], chunk.text);
            assert!(chunk.text.chars().count() <= size);
        }
        assert_eq!(reassemble(&chunks), MIXED, "size {size}");
    }
}

#[test]
fn test_overlapping_chunks_cover_emoji_runs() {
    let text = "🦀🧪✅❌🎉🎊🥳👋";
    let chunker = Chunker::new(3, 1).unwrap();
    let chunks = chunker.chunk_text(text, Path::new("emoji.txt"));

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["🦀🧪✅", "✅❌🎉", "🎉🎊🥳", "🥳👋"]);
    assert_eq!(reassemble(&chunks), text);
}

#[tokio::test]
async fn test_index_multibyte_file_offsets() {
    let repo = TestRepo::with_files(&[("src/mixed.rs", MIXED)]);
    let mut config = test_config();
    config.indexing.chunk_size = 7;
    let (services, index) = create_test_services(config);

    let report = services
        .grok(&Location::Local(repo.path().to_path_buf()))
        .await
        .unwrap();

    let expected_chunks = MIXED.chars().count().div_ceil(7);
    assert_eq!(report.indexed[0].chunks_created, expected_chunks);

    let entries = index.entries("copacetic");
    assert_eq!(entries.len(), expected_chunks);
    for entry in &entries {
        let start = entry.metadata["start_offset"].as_u64().unwrap() as usize;
        let end = entry.metadata["end_offset"].as_u64().unwrap() as usize;
        assert_eq!(&MIXED[start..end], entry.content);
        assert_eq!(entry.metadata["language"], "Rust");
    }
}

#[tokio::test]
async fn test_entries_slice_the_bytes_on_disk() {
    let repo = TestRepo::with_bytes(&[
        ("src/latin1.go", b"// caf\xe9\npackage main\n"),
        ("src/utf8.go", "// café 🚀\npackage main\n".as_bytes()),
    ]);
    let mut config = test_config();
    config.pool.failure_policy = FailurePolicy::Continue;
    config.indexing.chunk_size = 5;
    let (services, index) = create_test_services(config);

    let err = services
        .grok(&Location::Local(repo.path().to_path_buf()))
        .await
        .unwrap_err();

    // Undecodable text is reported by name instead of indexed with rewritten content
    assert_eq!(err.failed_paths(), vec![&PathBuf::from("src/latin1.go")]);
    assert!(err.to_string().contains("not valid UTF-8"));

    let on_disk = std::fs::read(repo.path().join("src/utf8.go")).unwrap();
    let entries = index.entries("copacetic");
    assert!(!entries.is_empty());
    for entry in &entries {
        assert_eq!(entry.metadata["path"], "src/utf8.go");
        let start = entry.metadata["start_offset"].as_u64().unwrap() as usize;
        let end = entry.metadata["end_offset"].as_u64().unwrap() as usize;
        assert!(end <= on_disk.len());
        assert_eq!(&on_disk[start..end], entry.content.as_bytes());
    }
    let last_end = entries
        .iter()
        .filter_map(|e| e.metadata["end_offset"].as_u64())
        .max()
        .unwrap();
    assert_eq!(last_end as usize, on_disk.len());
}
