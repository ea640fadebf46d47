#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use tbmaker::generator::{count_markers, merge_existing, preserved_regions};
use tbmaker::write_code;
use tempfile::TempDir;

const MARK: &str = "// EXISTING_CODE";

/// Builds a document with one marker pair per region, each surrounded by generated text.
fn document(prefix: &str, regions: &[&str]) -> String {
    let mut out = format!("{prefix} header\n");
    for (i, region) in regions.iter().enumerate() {
        out.push_str(&format!("{MARK}\n{region}{MARK}\n{prefix} section {i}\n"));
    }
    out
}

#[test]
fn test_old_region_replaces_new_region() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("pkg/out.go");
    fs::create_dir_all(dest.parent().unwrap()).unwrap();
    fs::write(&dest, document("old", &["OLD\n"])).unwrap();

    assert!(write_code(&dest, &document("new", &["NEW\n"])).unwrap());
    assert_eq!(fs::read_to_string(&dest).unwrap(), document("new", &["OLD\n"]));
}

#[test]
fn test_ordinal_pairing_for_every_region_count() {
    let existing_regions = ["a\n", "b\nb\n", "", "d\n"];
    for new_pairs in 0..6 {
        let fresh: Vec<String> = (0..new_pairs).map(|i| format!("fresh {i}\n")).collect();
        let fresh_refs: Vec<&str> = fresh.iter().map(String::as_str).collect();

        let merged = merge_existing(
            &document("old", &existing_regions),
            &document("new", &fresh_refs),
        );

        assert_eq!(count_markers(&merged) % 2, 0);
        let regions = preserved_regions(&merged);
        assert_eq!(regions.len(), new_pairs);
        for (i, region) in regions.iter().enumerate() {
            let expected = existing_regions.get(i).copied().unwrap_or(fresh_refs[i]);
            assert_eq!(region, expected, "region {i} with {new_pairs} new pairs");
        }
    }
}

#[test]
fn test_writer_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out.go");
    let content = document("gen", &["x\n", "y\n"]);

    assert!(write_code(&dest, &content).unwrap());
    let first = fs::read_to_string(&dest).unwrap();
    assert!(!write_code(&dest, &content).unwrap());
    assert_eq!(fs::read_to_string(&dest).unwrap(), first);
}

#[test]
fn test_generated_text_changes_are_written() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out.go");
    write_code(&dest, &document("v1", &["mine\n"])).unwrap();

    assert!(write_code(&dest, &document("v2", &["ignored\n"])).unwrap());
    assert_eq!(fs::read_to_string(&dest).unwrap(), document("v2", &["mine\n"]));
}

#[test]
fn test_three_markers_rejected() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out.go");
    let content = format!("{MARK}\n{MARK}\n{MARK}\n");
    let err = write_code(&dest, &content).unwrap_err();
    assert!(err.to_string().contains("must have an even number"));
    assert!(!dest.exists());
}
