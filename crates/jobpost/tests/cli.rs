/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for the jobpost binary.
 */

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn write(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn data_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    write(
        dir.path(),
        "jobs/index.json",
        r#"[{"file": "dev.json"}, {"file": "qa.json", "id": "qa"}]"#,
    );
    write(
        dir.path(),
        "jobs/dev.json",
        r#"{"title": "Backend Developer", "company": "Công ty ABC", "location": "Đà Nẵng"}"#,
    );
    write(dir.path(), "jobs/qa.json", r#"{"title": "QA Engineer"}"#);
    write(
        dir.path(),
        "layouts.json",
        r#"[
            {"id": "classic", "name": "Classic", "description": "Two columns"},
            {"id": "list", "name": "List", "template": "{{#jobs}}- {{title}}\n{{/jobs}}"}
        ]"#,
    );
    dir
}

fn jobpost(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jobpost"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute jobpost")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn list_prints_catalog() {
    let dir = data_dir();
    let output = jobpost(&["list", "--data", path_str(dir.path())]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dev  Backend Developer | Công ty ABC | Đà Nẵng"));
    assert!(stdout.contains("qa  QA Engineer"));
    assert!(stdout.contains("classic  Classic - Two columns"));
    assert!(stdout.contains("list  List"));
}

#[test]
fn render_to_stdout() {
    let dir = data_dir();
    let output = jobpost(&[
        "render",
        "--data",
        path_str(dir.path()),
        "--job",
        "qa",
        "--job",
        "dev",
        "--layout",
        "list",
    ]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "<div class=\"preview preview-layout--list\">\n- Backend Developer\n- QA Engineer\n</div>\n"
    );
}

#[test]
fn render_to_output_dir_uses_export_name() {
    let dir = data_dir();
    let out = TempDir::new().unwrap();
    let before = chrono::Utc::now().date_naive();
    let output = jobpost(&[
        "render",
        "--data",
        path_str(dir.path()),
        "--job",
        "dev",
        "--output-dir",
        path_str(out.path()),
    ]);
    let after = chrono::Utc::now().date_naive();
    assert!(output.status.success());

    let files: Vec<String> = fs::read_dir(out.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("cong-ty-abc-classic-"), "{}", files[0]);
    assert!(files[0].ends_with(".html"));

    // The date stamp is the UTC calendar date
    let stamped: Vec<String> = [before, after]
        .iter()
        .map(|date| format!("cong-ty-abc-classic-{}.html", date.format("%Y-%m-%d")))
        .collect();
    assert!(stamped.contains(&files[0]), "{} not in {:?}", files[0], stamped);

    let html = fs::read_to_string(out.path().join(&files[0])).unwrap();
    assert!(html.contains("<h2 class=\"job-card__title\">Backend Developer</h2>"));
}

#[test]
fn render_check_fails_on_warnings() {
    let dir = data_dir();
    write(dir.path(), "custom.template", "{{#jobs}}{{titel}}{{/jobs}");
    let template = dir.path().join("custom.template");
    let out = dir.path().join("out.html");

    let output = jobpost(&[
        "render",
        "--data",
        path_str(dir.path()),
        "--job",
        "dev",
        "--template",
        path_str(&template),
        "--output",
        path_str(&out),
        "--check",
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unclosed-section"), "{}", stderr);
    // Output is still written before the check fails
    assert!(out.exists());
}

#[test]
fn render_unknown_job_fails() {
    let dir = data_dir();
    let output = jobpost(&["render", "--data", path_str(dir.path()), "--job", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown job: nope"));
}
