//! Page discovery and file output tests

mod common;

use std::fs;
use std::path::PathBuf;

use common::{pmemobj_highlighter, PMEMOBJ_PAGE};
use typemark::cli::OutputMode;
use typemark::process::{collect_pages, process_all, process_page, PageError};
use typemark::util::FileOpenError;

fn doc_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("html/search")).unwrap();
    fs::write(dir.path().join("html/index.html"), PMEMOBJ_PAGE).unwrap();
    fs::write(
        dir.path().join("html/search/all_0.html"),
        "<html><body></body></html>",
    )
    .unwrap();
    fs::write(dir.path().join("html/search/all_0.js"), "var searchData=[];").unwrap();
    fs::write(dir.path().join("html/doxygen.css"), "body {}").unwrap();
    dir
}

#[test]
fn test_collect_pages_walks_directories() {
    let dir = doc_tree();
    let pages = collect_pages(&[dir.path().to_path_buf()]);
    let names: Vec<String> = pages
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["index.html", "all_0.html"]);
}

#[test]
fn test_collect_pages_keeps_explicit_files() {
    let pages = collect_pages(&[PathBuf::from("does-not-exist.txt")]);
    assert_eq!(pages, vec![PathBuf::from("does-not-exist.txt")]);
}

#[test]
fn test_in_place_rewrites_file() {
    let dir = doc_tree();
    let page = dir.path().join("html/index.html");
    let mut sink = Vec::new();

    let report = process_page(
        &mut pmemobj_highlighter(),
        &page,
        &OutputMode::InPlace,
        &mut sink,
    )
    .unwrap();

    assert_eq!(report.marked, 5);
    assert!(sink.is_empty());
    let written = fs::read_to_string(&page).unwrap();
    assert!(written.contains(r#"<span class="typ">PMEMmutex</span>"#));
}

#[test]
fn test_check_mode_writes_nothing() {
    let dir = doc_tree();
    let page = dir.path().join("html/index.html");
    let mut sink = Vec::new();

    let report = process_page(
        &mut pmemobj_highlighter(),
        &page,
        &OutputMode::Check,
        &mut sink,
    )
    .unwrap();

    assert!(report.changed());
    assert!(sink.is_empty());
    assert_eq!(fs::read_to_string(&page).unwrap(), PMEMOBJ_PAGE);
}

#[test]
fn test_stdout_mode_writes_to_sink() {
    let dir = doc_tree();
    let page = dir.path().join("html/index.html");
    let mut sink = Vec::new();

    process_page(
        &mut pmemobj_highlighter(),
        &page,
        &OutputMode::Stdout,
        &mut sink,
    )
    .unwrap();

    let printed = String::from_utf8(sink).unwrap();
    assert!(printed.contains(r#"<span class="typ">PMEMobjpool</span>"#));
}

#[test]
fn test_output_file_mode() {
    let dir = doc_tree();
    let page = dir.path().join("html/index.html");
    let target = dir.path().join("out.html");
    let mut sink = Vec::new();

    process_page(
        &mut pmemobj_highlighter(),
        &page,
        &OutputMode::File(target.clone()),
        &mut sink,
    )
    .unwrap();

    assert!(fs::read_to_string(&target)
        .unwrap()
        .contains(r#"<code><span class="typ">TOID</span></code>"#));
    assert_eq!(fs::read_to_string(&page).unwrap(), PMEMOBJ_PAGE);
}

#[test]
fn test_missing_page_is_reported() {
    let mut sink = Vec::new();
    let err = process_page(
        &mut pmemobj_highlighter(),
        &PathBuf::from("/nonexistent/index.html"),
        &OutputMode::Check,
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, PageError::Invalid(FileOpenError::NotFound)));
}

#[test]
fn test_process_all_continues_after_failure() {
    let dir = doc_tree();
    let pages = vec![
        PathBuf::from("/nonexistent/index.html"),
        dir.path().join("html/index.html"),
    ];
    let mut sink = Vec::new();

    let summary = process_all(
        &mut pmemobj_highlighter(),
        &pages,
        &OutputMode::Check,
        &mut sink,
    );

    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.pages.len(), 1);
    assert_eq!(summary.marked(), 5);
    assert_eq!(summary.changed_pages().count(), 1);
}
