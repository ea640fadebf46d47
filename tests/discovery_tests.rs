#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use tbmaker::generator::Category;
use tbmaker::{discover_generators, Generator, MakerError};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "/*\noutput: x\n*/\n").unwrap();
}

fn tree(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        touch(tmp.path(), file);
    }
    tmp
}

#[test]
fn test_generators_sorted_by_category_and_template() {
    let tmp = tree(&[
        "types/z.go.tmpl",
        "types/a.go.tmpl",
        "routes/sdk_python.py.tmpl",
        "routes/cmd.go.tmpl",
        "codebase/version.go.tmpl",
        "groups/readme.md.tmpl",
    ]);

    let generators = discover_generators(tmp.path(), None).unwrap();
    let categories: Vec<_> = generators.iter().map(|g| g.against.as_str()).collect();
    assert_eq!(categories, vec!["codebase", "groups", "routes", "types"]);
    assert_eq!(
        generators[2].templates,
        vec!["cmd.go.tmpl".to_string(), "sdk_python.py.tmpl".to_string()]
    );
    assert_eq!(
        generators[3].templates,
        vec!["a.go.tmpl".to_string(), "z.go.tmpl".to_string()]
    );
    assert_eq!(generators[3].category().unwrap(), Category::Types);
}

#[test]
fn test_partials_and_other_files_ignored() {
    let tmp = tree(&[
        "types/types.go.tmpl",
        "types/header.partial.tmpl",
        "types/README.md",
        "loose.tmpl",
    ]);

    let generators = discover_generators(tmp.path(), None).unwrap();
    assert_eq!(
        generators,
        vec![Generator {
            against: "types".to_string(),
            templates: vec!["types.go.tmpl".to_string()],
        }]
    );
}

#[test]
fn test_nested_templates_keep_relative_path() {
    let tmp = tree(&["routes/sdk/python.py.tmpl", "routes/cmd.go.tmpl"]);
    let generators = discover_generators(tmp.path(), None).unwrap();
    assert_eq!(
        generators[0].templates,
        vec!["cmd.go.tmpl".to_string(), "sdk/python.py.tmpl".to_string()]
    );
}

#[test]
fn test_filter_applies_to_full_path() {
    let tmp = tree(&["routes/cmd.go.tmpl", "routes/sdk_go.go.tmpl", "types/t.go.tmpl"]);

    let generators = discover_generators(tmp.path(), Some("sdk_")).unwrap();
    assert_eq!(generators.len(), 1);
    assert_eq!(generators[0].templates, vec!["sdk_go.go.tmpl".to_string()]);

    let unfiltered = discover_generators(tmp.path(), Some("")).unwrap();
    assert_eq!(unfiltered.len(), 2);
}

#[test]
fn test_unknown_category_discovered_but_rejected() {
    let tmp = tree(&["widgets/w.tmpl"]);
    let generators = discover_generators(tmp.path(), None).unwrap();
    assert_eq!(generators[0].against, "widgets");
    assert!(matches!(
        generators[0].category(),
        Err(MakerError::UnknownCategory(_))
    ));
}

#[test]
fn test_missing_root_is_configuration_error() {
    let tmp = TempDir::new().unwrap();
    let err = discover_generators(&tmp.path().join("nope"), None).unwrap_err();
    assert!(err.is_configuration());
}
