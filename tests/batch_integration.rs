//! Batch rewriting of directory trees

mod common;

use common::{create_test_contextifier, MATERIAL_LABELS};
use contextifyer_core::batch::{process_path, BatchOptions};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_directory_tree_mirrored() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    fs::create_dir_all(input.path().join("walls/exterior")).unwrap();
    fs::write(input.path().join("intro.md"), "Brick is heavy").unwrap();
    fs::write(input.path().join("walls/exterior/straw.md"), "Straw bales").unwrap();
    fs::write(input.path().join("walls/notes.txt"), "Brick ignored").unwrap();

    let contextifier = create_test_contextifier(MATERIAL_LABELS);
    let report = process_path(input.path(), output.path(), &contextifier, &BatchOptions::default()).unwrap();

    assert_eq!(report.processed.len(), 2);
    assert_eq!(report.total_links(), 2);
    assert_eq!(
        fs::read_to_string(output.path().join("intro.md")).unwrap(),
        "[Brick](http://example.org/materials#Brick) is heavy"
    );
    assert_eq!(
        fs::read_to_string(output.path().join("walls/exterior/straw.md")).unwrap(),
        "[Straw](http://example.org/materials#Straw) bales"
    );
    assert!(!output.path().join("walls/notes.txt").exists());
}

#[test]
fn test_custom_extension() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.txt"), "brick").unwrap();
    fs::write(input.path().join("b.md"), "brick").unwrap();

    let contextifier = create_test_contextifier(MATERIAL_LABELS);
    let options = BatchOptions {
        extension: "txt".to_string(),
    };
    let report = process_path(input.path(), output.path(), &contextifier, &options).unwrap();

    assert_eq!(report.processed.len(), 1);
    assert!(output.path().join("a.txt").exists());
    assert!(!output.path().join("b.md").exists());
}

#[test]
fn test_bad_file_does_not_stop_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("bad.md"), [0xc3, 0x28]).unwrap();
    fs::write(input.path().join("good.md"), "Insulation").unwrap();

    let contextifier = create_test_contextifier(MATERIAL_LABELS);
    let report = process_path(input.path(), output.path(), &contextifier, &BatchOptions::default()).unwrap();

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].input.ends_with("bad.md"));
    assert!(output.path().join("good.md").exists());
}
