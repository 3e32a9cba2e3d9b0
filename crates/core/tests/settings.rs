use std::path::{Path, PathBuf};

use digicase_core::config::{Settings, DEFAULT_TEMPLATES_DIR};
use tempfile::tempdir;

#[test]
fn defaults_point_at_views_dir() {
    let settings = Settings::default();
    assert_eq!(settings.templates_dir, PathBuf::from(DEFAULT_TEMPLATES_DIR));
    assert_eq!(settings.templates().dir(), Path::new(DEFAULT_TEMPLATES_DIR));
    assert!(settings.default_case_dir.is_none());
}

#[test]
fn load_fills_missing_fields_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("digicase.json");
    std::fs::write(&path, r#"{"default_case_dir":"/srv/cases"}"#).unwrap();

    let settings = Settings::load(&path).expect("load");
    assert_eq!(settings.templates_dir, PathBuf::from(DEFAULT_TEMPLATES_DIR));
    assert_eq!(settings.default_case_dir, Some(PathBuf::from("/srv/cases")));
}

#[test]
fn load_reports_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("digicase.json");
    std::fs::write(&path, "not-json").unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse settings JSON"), "unexpected error: {err}");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = Settings::load_or_default(Some(&dir.path().join("absent.json"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read settings"), "unexpected error: {err}");
}

#[test]
fn resolve_case_path_only_moves_bare_names() {
    let settings =
        Settings { default_case_dir: Some(PathBuf::from("/srv/cases")), ..Settings::default() };
    assert_eq!(
        settings.resolve_case_path(Path::new("burglary.digicase")),
        PathBuf::from("/srv/cases/burglary.digicase")
    );
    assert_eq!(
        settings.resolve_case_path(Path::new("local/burglary.digicase")),
        PathBuf::from("local/burglary.digicase")
    );
    assert_eq!(
        Settings::default().resolve_case_path(Path::new("x.digicase")),
        PathBuf::from("x.digicase")
    );
}
