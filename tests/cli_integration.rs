//! CLI integration tests
//!
//! These run the built `liberty-detect` binary and check output formats,
//! marker persistence and exit codes.

mod support;

use std::path::Path;
use std::process::{Command, Output};
use support::{copy_fixture, read_project_file};

fn liberty_detect() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_liberty-detect"));
    command
        .env_remove("LIBERTY_DETECT_LOG_LEVEL")
        .env_remove("LIBERTY_DETECT_LOG_JSON")
        .env_remove("LIBERTY_DETECT_NATURE_ID")
        .env_remove("LIBERTY_DETECT_METADATA_FILE")
        .env_remove("RUST_LOG");
    command
}

fn run(args: &[&str]) -> Output {
    liberty_detect()
        .args(args)
        .output()
        .expect("Failed to execute liberty-detect")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("Non-UTF-8 temp path")
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("classify"));
    assert!(text.contains("inspect"));
    assert!(text.contains("compare"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_classify_json_writes_marker() {
    let (_temp, root) = copy_fixture("maven-profile");

    let output = run(&["classify", path_arg(&root), "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["project"], "maven-profile");
    assert_eq!(value["is_liberty"], true);
    assert_eq!(value["supports_containers"], true);
    assert_eq!(value["marker"], "added");
    assert_eq!(value["plugin"]["site"]["id"], "liberty");

    let project_file = read_project_file(&root).unwrap();
    assert!(project_file.contains("io.openliberty.tools.eclipse.libertyNature"));
}

#[test]
fn test_classify_second_run_uses_marker() {
    let (_temp, root) = copy_fixture("gradle-buildscript");

    assert!(run(&["classify", path_arg(&root)]).status.success());
    let output = run(&["classify", path_arg(&root), "--format", "yaml"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("is_liberty: true"));
    assert!(text.contains("source: marker"));
}

#[test]
fn test_classify_human_output() {
    let (_temp, root) = copy_fixture("gradle-apply-only");

    let output = run(&["classify", path_arg(&root)]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("gradle-apply-only: not a Liberty project"));
    assert!(text.contains("Build System:  Gradle"));
}

#[test]
fn test_classify_honours_custom_nature_id() {
    let (_temp, root) = copy_fixture("maven-build");

    let output = liberty_detect()
        .env("LIBERTY_DETECT_NATURE_ID", "com.example.libertyNature")
        .args(["classify", path_arg(&root)])
        .output()
        .unwrap();

    assert!(output.status.success());
    let project_file = read_project_file(&root).unwrap();
    assert!(project_file.contains("<nature>com.example.libertyNature</nature>"));
    assert!(!project_file.contains("io.openliberty.tools.eclipse.libertyNature"));
}

#[test]
fn test_inspect_leaves_metadata_alone() {
    let (_temp, root) = copy_fixture("maven-parent");

    let output = run(&["inspect", path_arg(&root), "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["is_liberty"], true);
    assert_eq!(value["supports_containers"], false);
    assert_eq!(value["plugin"]["declaration"]["version"], "3.2");
    assert!(read_project_file(&root).is_none());
}

#[test]
fn test_classify_missing_path_fails() {
    let output = run(&["classify", "/nonexistent/liberty/project"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_classify_unwritable_metadata_fails() {
    let (_temp, root) = copy_fixture("maven-build");
    std::fs::write(root.join(".project"), "not xml at all").unwrap();

    let output = run(&["classify", path_arg(&root)]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_config_fails() {
    let (_temp, root) = copy_fixture("maven-build");

    let output = liberty_detect()
        .env("LIBERTY_DETECT_METADATA_FILE", "../.project")
        .args(["classify", path_arg(&root)])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_compare() {
    let cases = [
        ("3.3-M1", "3.2", "3.3-M1 > 3.2"),
        ("3.1-M1", "3.1", "3.1-M1 < 3.1"),
        ("1.0.0.Final", "1", "1.0.0.Final = 1"),
        ("${liberty.version}", "3.3", "not comparable"),
    ];

    for (left, right, expected) in cases {
        let output = run(&["compare", left, right]);
        assert!(output.status.success());
        assert_eq!(stdout(&output).trim(), expected);
    }
}

#[test]
fn test_config_json() {
    let output = run(&["config", "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["metadata_file"], ".project");
    assert_eq!(value["nature_id"], "io.openliberty.tools.eclipse.libertyNature");
}

#[test]
fn test_logs_go_to_stderr() {
    let (_temp, root) = copy_fixture("maven-build");

    let output = run(&["classify", path_arg(&root), "--format", "json", "-v"]);

    assert!(output.status.success());
    let value: Result<serde_json::Value, _> = serde_json::from_str(&stdout(&output));
    assert!(value.is_ok());
    assert!(!output.stderr.is_empty());
}
