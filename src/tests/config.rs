use super::Config;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_missing_file_uses_defaults() {
    let cfg = Config::load_from(Path::new("/no/such/coursetree.toml"));

    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.expand_depth, 2);
    assert!(cfg.show_documents);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "expand_depth = 4").unwrap();

    let cfg = Config::load_from(file.path());

    assert_eq!(cfg.expand_depth, 4);
    assert!(cfg.show_documents);
    assert_eq!(cfg.preferences_file, ".coursetree.json");
}

#[test]
fn test_invalid_file_falls_back() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "expand_depth = \"deep\"").unwrap();

    assert_eq!(Config::load_from(file.path()), Config::default());
}
