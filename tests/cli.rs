use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn write_file(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn create_go_project(root: &Path) {
    write_file(&root.join("main.go"), b"package main\nfunc main(){}");
    write_file(&root.join("go.mod"), b"module x");
}

#[test]
fn cli_markdown_report_for_go_project() {
    let dir = tempdir().unwrap();
    create_go_project(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_projectdump"))
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("# ProjectDump Analysis"));
    assert!(stdout.contains("- **Primary Language:** Go\n"));
    assert!(stdout.contains("- **Total Files:** 2\n"));
    assert!(stdout.contains("- **Processed Files:** 2\n"));
    assert!(stdout.contains("### Go (60.0% confidence)"));
    assert!(stdout.contains("├── go.mod\n└── main.go\n"));
}

#[test]
fn cli_json_respects_ignore_rules() {
    let dir = tempdir().unwrap();

    write_file(&dir.path().join("src/app.py"), b"import os\n");
    write_file(&dir.path().join("node_modules/dep/index.js"), b"module.exports = 1\n");
    write_file(&dir.path().join(".hidden.py"), b"def hidden(): pass\n");
    write_file(&dir.path().join("blob.dat"), b"abc\0\x01\x02");
    write_file(&dir.path().join("logo.png"), b"png");
    write_file(&dir.path().join(".env"), b"KEY=value\n");

    let output = Command::new(env!("CARGO_BIN_EXE_projectdump"))
        .arg(dir.path())
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let project = &v["projects"][0];

    let paths: Vec<&str> = project["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect();

    assert_eq!(paths, vec![".env", "src/app.py"]);
    assert_eq!(project["total_files"], 5);
    assert_eq!(project["processed_files"], 2);
}

#[test]
fn cli_writes_output_file() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project");
    create_go_project(&project);
    let out = dir.path().join("dump.md");

    let output = Command::new(env!("CARGO_BIN_EXE_projectdump"))
        .arg(&project)
        .arg("--output")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let report = fs::read_to_string(out).unwrap();
    assert!(report.contains("#### main.go"));
}

#[test]
fn cli_multiple_roots() {
    let dir = tempdir().unwrap();
    let go = dir.path().join("go");
    let rust = dir.path().join("rust");
    create_go_project(&go);
    write_file(&rust.join("Cargo.toml"), b"[package]\n");
    write_file(&rust.join("src/main.rs"), b"fn main() {}\n");

    let output = Command::new(env!("CARGO_BIN_EXE_projectdump"))
        .args([&go, &rust])
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["projects"][0]["primary_language"], "Go");
    assert_eq!(v["projects"][1]["primary_language"], "Rust");
}

#[test]
fn cli_missing_path_fails() {
    let dir = tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_projectdump"))
        .arg(dir.path().join("does-not-exist"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("path not found"));
}
