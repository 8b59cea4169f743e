//! Integration tests for the unnotion binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const PAGE: &str = r#"[
  {"id": "h", "type": "heading_2", "heading_2": {"rich_text": [{"plain_text": "Notes"}]}},
  {"id": "a", "type": "numbered_list_item",
   "numbered_list_item": {"rich_text": [{"plain_text": "first"}]}},
  {"id": "b", "type": "numbered_list_item",
   "numbered_list_item": {"rich_text": [{"plain_text": "second"}]}}
]"#;

fn unnotion(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_unnotion"))
        .args(args)
        .env_remove("UNNOTION_STRICT")
        .output()
        .unwrap()
}

fn write_page(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_markdown_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_page(dir.path(), "page.json", PAGE);

    let output = unnotion(&["markdown", &input]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "## Notes\n\n1. first\n2. second"
    );
}

#[test]
fn test_convert_writes_all_formats() {
    let dir = TempDir::new().unwrap();
    let input = write_page(dir.path(), "notes.json", PAGE);
    let out = dir.path().join("out");

    let output = unnotion(&["convert", &input, "-o", &out.to_string_lossy()]);
    assert!(output.status.success());

    let page_dir = out.join("notes_output");
    for name in ["page.html", "page.md", "page.txt", "page.json"] {
        assert!(page_dir.join(name).is_file(), "missing {}", name);
    }
    let html = fs::read_to_string(page_dir.join("page.html")).unwrap();
    assert!(html.contains("<ol>"));
}

#[test]
fn test_convert_reports_failures() {
    let dir = TempDir::new().unwrap();
    let good = write_page(dir.path(), "good.json", PAGE);
    let bad = write_page(dir.path(), "bad.json", "not json");
    let out = dir.path().join("out");

    let output = unnotion(&["convert", &good, &bad, "-o", &out.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.join("good_output").join("page.md").is_file());
    assert!(!out.join("bad_output").exists());
}

#[test]
fn test_strict_flag_rejects_invalid_block() {
    let dir = TempDir::new().unwrap();
    let input = write_page(dir.path(), "page.json", r#"[{"id": "p"}, 42]"#);

    assert!(unnotion(&["text", &input]).status.success());
    assert_eq!(unnotion(&["--strict", "text", &input]).status.code(), Some(1));
}
