use precopy_core::{
    CheckConfig, CheckReport, CompareStats, DirectoryEntry, DivergenceKind, DivergenceNote,
    EntryKind, EntryPair, PairClass, Verdict,
};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_entry_kind_from_metadata() {
    let dir = std::env::temp_dir();
    let metadata = std::fs::symlink_metadata(&dir).unwrap();
    let entry = DirectoryEntry::from_metadata("tmp", &metadata);

    assert_eq!(entry.name(), "tmp");
    assert!(entry.is_dir() || entry.kind == EntryKind::Other);
}

#[test]
fn test_pair_classification_matrix() {
    let file = DirectoryEntry::new("n", EntryKind::File, 1);
    let dir = DirectoryEntry::new("n", EntryKind::Directory, 0);
    let other = DirectoryEntry::new("n", EntryKind::Other, 1);

    let cases = [
        (&file, &file, PairClass::Files),
        (&file, &other, PairClass::Files),
        (&other, &other, PairClass::Files),
        (&dir, &dir, PairClass::Directories),
        (&dir, &file, PairClass::TypeMismatch),
        (&other, &dir, PairClass::TypeMismatch),
    ];

    for (source, dest, expected) in cases {
        assert_eq!(EntryPair::new(source, dest).classify(), expected);
    }
}

#[test]
fn test_report_json_shape() {
    let report = CheckReport::new(
        PathBuf::from("/src"),
        PathBuf::from("/dst"),
        vec![DivergenceNote::content_mismatch(
            "/src/b.txt".into(),
            "/dst/b.txt".into(),
        )],
        CompareStats {
            dirs_paired: 2,
            files_compared: 1,
            size_rejections: 0,
            bytes_read: 10,
            source_only: 0,
        },
        Duration::from_millis(3),
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["notes"][0]["kind"], "content_mismatch");
    assert_eq!(json["notes"][0]["source"], "/src/b.txt");
    assert_eq!(json["stats"]["files_compared"], 1);
    assert_eq!(serde_json::to_value(report.verdict()).unwrap(), "unsafe");

    let back: CheckReport = serde_json::from_value(json).unwrap();
    assert_eq!(back.notes, report.notes);
    assert_eq!(back.verdict(), Verdict::Unsafe);
}

#[test]
fn test_note_display_and_kind() {
    let note = DivergenceNote::new(
        "left/x".into(),
        "right/x".into(),
        DivergenceKind::TypeMismatch,
    );
    assert_eq!(note.to_string(), "'left/x' and 'right/x' have different types");
}

#[test]
fn test_config_roundtrip_through_builder() {
    let config = CheckConfig::builder()
        .source_root("a")
        .dest_root("b")
        .build()
        .unwrap();
    assert_eq!(config.source_root, PathBuf::from("a"));
    assert_eq!(config.chunk_size, precopy_core::DEFAULT_CHUNK_SIZE);
}
