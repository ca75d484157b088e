//! Integration tests for loading, normalizing and saving datasets.

use std::fs;

use tempfile::tempdir;

use living_archive_dataset::{DatasetError, bundled, load_file, normalize_all, save_file};

#[test]
fn test_bundled_dataset_resolves_anansi_family() {
    let entities = bundled().expect("bundled dataset should load");

    let anansi = entities
        .iter()
        .find(|entity| entity.name() == "Anansi")
        .expect("Anansi should be bundled");
    assert_eq!(anansi.relations().parents, vec!["Nyame"]);
    assert_eq!(anansi.relations().conjoint, vec!["Okonore Yaa", "Aso"]);
    assert_eq!(anansi.relations().descendants, vec!["Ntikuma"]);

    // Aso is referenced but intentionally not recorded
    assert!(!entities.iter().any(|entity| entity.name() == "Aso"));
}

#[test]
fn test_save_then_load_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("archive.json");

    let mut entities = bundled().unwrap();
    normalize_all(&mut entities);
    save_file(&path, &entities).expect("Failed to save dataset");

    let reloaded = load_file(&path).expect("Failed to reload dataset");
    assert_eq!(reloaded, entities);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let err = load_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, DatasetError::Read { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_load_file_with_syntax_error_keeps_source() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{\"entity_type\": \"Hero\", \"name\": \"Anansi\"},]").unwrap();

    let err = load_file(&path).unwrap_err();
    assert!(err.source_text().unwrap().starts_with("[{"));
    assert_eq!(err.issues().len(), 1);
}
