use dupehunt_core::{
    FileRecord, FileSet, FinderConfig, HashAlgorithm, ScanConfig, ScanError, ScanWarning,
    SizeUnit, WarningKind,
};
use std::path::{Path, PathBuf};

#[test]
fn test_file_set_sizes() {
    // Mirrors the cases a size listing has to handle: both known,
    // one missing, none known, empty set.
    let cases: Vec<(&str, Vec<FileRecord>, u64)> = vec![
        (
            "both sizes",
            vec![FileRecord::new("/p0", 123), FileRecord::new("/p1", 456)],
            579,
        ),
        (
            "one size only",
            vec![FileRecord::new("/p0", 123), FileRecord::unknown_size("/p1")],
            123,
        ),
        (
            "no sizes",
            vec![FileRecord::unknown_size("/p0"), FileRecord::unknown_size("/p1")],
            0,
        ),
        ("empty", Vec::new(), 0),
    ];

    for (desc, records, expected) in cases {
        let set = FileSet::from_records("/", records);
        assert_eq!(set.total_size(), expected, "{desc}");
    }
}

#[test]
fn test_file_set_iterates_in_path_order() {
    let set = FileSet::from_records(
        "/root",
        [
            FileRecord::new("/root/c", 1),
            FileRecord::new("/root/a", 2),
            FileRecord::new("/root/b", 3),
        ],
    );

    let paths: Vec<&Path> = set.iter().map(|r| r.path()).collect();
    assert_eq!(
        paths,
        vec![Path::new("/root/a"), Path::new("/root/b"), Path::new("/root/c")]
    );
}

#[test]
fn test_scan_config_serde_defaults() {
    let config: ScanConfig = serde_json::from_str(r#"{"root": "/data"}"#).unwrap();
    assert_eq!(config.root, PathBuf::from("/data"));
    assert_eq!(config.max_files, 0);
}

#[test]
fn test_finder_config_serde() {
    let config: FinderConfig =
        serde_json::from_str(r#"{"algorithm": "sha512", "workers": 4}"#).unwrap();
    assert_eq!(config.algorithm, HashAlgorithm::Sha512);
    assert_eq!(config.workers, 4);

    let config: FinderConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.algorithm, HashAlgorithm::Sha1);
    assert_eq!(config.workers, 2);
}

#[test]
fn test_size_unit_conversion_table() {
    let bytes = 5 * 1024u64.pow(4);
    assert_eq!(SizeUnit::Kb.convert(bytes), 5.0 * 1024.0 * 1024.0 * 1024.0);
    assert_eq!(SizeUnit::Mb.convert(bytes), 5.0 * 1024.0 * 1024.0);
    assert_eq!(SizeUnit::Gb.convert(bytes), 5.0 * 1024.0);
    assert_eq!(SizeUnit::Tb.convert(bytes), 5.0);
}

#[test]
fn test_errors_display() {
    let err = ScanError::NotADirectory {
        path: PathBuf::from("/etc/passwd"),
    };
    assert_eq!(err.to_string(), "Root path is not a directory: /etc/passwd");

    let warning = ScanWarning::read_error("/locked", "permission denied");
    assert_eq!(warning.kind, WarningKind::ReadError);
    assert_eq!(warning.message, "Read error: permission denied");
}
