use fileset_fs::{Error, NormalizedPath, io};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_read_text_roundtrips_file_contents() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.yml");
    fs::write(&file_path, "paths:\n  - /var/log/*.log\n").unwrap();

    let content = io::read_text(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(content, "paths:\n  - /var/log/*.log\n");
}

#[test]
fn test_require_dir() {
    let temp = TempDir::new().unwrap();
    let root = NormalizedPath::new(temp.path());
    fs::create_dir(temp.path().join("nginx")).unwrap();
    fs::write(temp.path().join("file.txt"), "x").unwrap();

    assert!(io::require_dir(&root.join("nginx")).is_ok());

    let err = io::require_dir(&root.join("missing")).unwrap_err();
    match err {
        Error::Io { source, .. } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected Io, got {other:?}"),
    }

    assert!(io::require_dir(&root.join("file.txt")).is_err());
}

proptest! {
    #[test]
    fn join_then_file_name_returns_last_segment(
        base in "[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        name in "[a-z]{1,8}\\.[a-z]{1,4}",
    ) {
        let joined = NormalizedPath::new(&base).join(&name);
        prop_assert_eq!(joined.file_name(), Some(name.as_str()));
        prop_assert!(!joined.as_str().contains("//"));
    }
}
