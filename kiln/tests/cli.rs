//! Integration tests driving the kiln binary over throwaway projects.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn kiln(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kiln"))
        .args(args)
        .current_dir(project)
        .output()
        .expect("run kiln")
}

fn write(project: &Path, relative: &str, content: &str) {
    let path = project.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A project with one source file carrying the built-in bean trigger.
fn bean_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "kiln.toml", "");
    write(
        temp.path(),
        "src/main/java/com/acme/Widget.java",
        "package com.acme;\n\nimport dev.kiln.generate.GenerateBean;\n\n@GenerateBean\npublic class Widget {}\n",
    );
    temp
}

#[test]
fn test_run_scans_and_reports_unlinked_generator() {
    let temp = bean_project();

    let output = kiln(temp.path(), &["run"]);
    assert!(output.status.success(), "{output:?}");

    // The binary links no emission engines, so the bound trigger is
    // reported and skipped rather than fired.
    let rendered = stdout(&output);
    assert!(rendered.contains("Skipped triggers"), "{rendered}");
    assert!(rendered.contains("Units scanned: 1"), "{rendered}");
    assert!(rendered.contains("Status: success"), "{rendered}");
    assert!(!temp.path().join("src/generated/java").exists());
}

#[test]
fn test_run_skip_performs_no_work() {
    let temp = bean_project();
    write(temp.path(), "kiln.toml", "[generate]\nskip = true\n");

    let output = kiln(temp.path(), &["run"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("skipped by configuration"));
    assert!(!temp.path().join("src/generated/java").exists());
}

#[test]
fn test_run_json_report() {
    let temp = bean_project();

    let output = kiln(temp.path(), &["run", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["status"], "Success");
    assert_eq!(report["units_scanned"], 1);
    assert_eq!(report["written"].as_array().unwrap().len(), 0);
}

#[test]
fn test_run_fails_on_malformed_source() {
    let temp = bean_project();
    write(
        temp.path(),
        "src/main/java/com/acme/Broken.java",
        "package com.acme\nclass Broken {}\n",
    );

    let output = kiln(temp.path(), &["run"]);
    assert!(!output.status.success());
}

#[test]
fn test_check_accepts_valid_manifest() {
    let temp = bean_project();

    let output = kiln(temp.path(), &["check"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("is valid"));
}

#[test]
fn test_check_rejects_malformed_expression() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "kiln.toml",
        "[generate]\nannotation_matches = \"(a && \"\n",
    );

    let output = kiln(temp.path(), &["check"]);
    assert!(!output.status.success());
}

#[test]
fn test_info_lists_bindings() {
    let temp = bean_project();
    write(
        temp.path(),
        "kiln.toml",
        "[generate.generators]\n\"com.acme.GenerateWidget\" = \"widget\"\n",
    );

    let output = kiln(temp.path(), &["info"]);
    assert!(output.status.success());

    let rendered = stdout(&output);
    assert!(rendered.contains("dev.kiln.generate.GenerateBean -> bean"));
    assert!(rendered.contains("com.acme.GenerateWidget -> widget"));
    assert!(rendered.contains("Scan roots (1)"), "{rendered}");
}

#[test]
fn test_missing_manifest_exits_nonzero() {
    let temp = TempDir::new().unwrap();

    let output = kiln(temp.path(), &["run"]);
    assert!(!output.status.success());
}
