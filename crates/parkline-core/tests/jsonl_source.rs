use std::path::PathBuf;

use parkline_core::{JsonLinesSource, SourceError, UplinkSource};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn jsonl_source_reads_uplinks_from_fixture() {
    let path = repo_root()
        .join("tests")
        .join("golden")
        .join("mixed")
        .join("input.jsonl");
    let mut source = JsonLinesSource::open(&path).unwrap();

    let mut uplinks = 0;
    let mut ports = Vec::new();
    while let Some(event) = source.next_uplink().unwrap() {
        uplinks += 1;
        ports.push(event.port);
    }

    assert_eq!(uplinks, 9);
    assert_eq!(ports, vec![1, 2, 7, 6, 4, 4, 9, 1, 3]);
}

#[test]
fn jsonl_source_missing_file() {
    let path = repo_root().join("tests").join("golden").join("missing.jsonl");
    let result = JsonLinesSource::open(&path);
    assert!(matches!(result, Err(SourceError::Io(_))));
}
