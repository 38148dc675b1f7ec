//! Integration tests for incgraph
//!
//! These drive the built binary against temporary source trees.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn incgraph(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_incgraph"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute incgraph")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn export_json(cwd: &Path, args: &[&str]) -> Value {
    let mut full = vec!["export"];
    full.extend_from_slice(args);
    let output = incgraph(cwd, &full);
    assert!(
        output.status.success(),
        "export failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn node_by_label<'a>(doc: &'a Value, label: &str) -> &'a Value {
    doc["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["label"] == label)
        .unwrap_or_else(|| panic!("no node labelled {label}"))
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = incgraph(dir.path(), &["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("include graph"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("export"));
}

#[test]
fn test_two_file_export() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.cpp", "#include \"b.h\"\n");
    write(dir.path(), "b.h", "");

    let doc = export_json(dir.path(), &["."]);

    assert_eq!(doc["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(doc["edges"].as_array().unwrap().len(), 1);

    let a = node_by_label(&doc, "a.cpp");
    let b = node_by_label(&doc, "b.h");
    assert_eq!(a["size"], 1);
    assert_eq!(b["size"], 0);

    let edge = &doc["edges"][0];
    assert_eq!(edge["source"], b["id"]);
    assert_eq!(edge["target"], a["id"]);
    assert_eq!(edge["size"], 10);
    assert_eq!(edge["type"], "curvedArrow");
}

#[test]
fn test_relation_includes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.cpp", "#include \"b.h\"\n");
    write(dir.path(), "b.h", "");

    let doc = export_json(dir.path(), &[".", "--relation", "includes"]);

    let a = node_by_label(&doc, "a.cpp");
    let b = node_by_label(&doc, "b.h");
    assert_eq!(doc["edges"][0]["source"], a["id"]);
    assert_eq!(doc["edges"][0]["target"], b["id"]);
}

#[test]
fn test_prefix_and_grouping_options() {
    let project = TempDir::new().unwrap();
    write(project.path(), "src/core/main.c", "#include <api/api.h>\n#include <stdio.h>\n");
    write(project.path(), "third_party/include/api/api.h", "");

    let doc = export_json(
        project.path(),
        &[
            "src",
            "-I",
            "third_party/include",
            "--group-granularity",
            "1",
            "--seed",
            "11",
        ],
    );

    let main = node_by_label(&doc, "main.c");
    assert_eq!(main["group"], "core");
    assert_eq!(main["size"], 2);

    let api = node_by_label(&doc, "api.h");
    assert_eq!(api["group"], "api");

    let stdio = node_by_label(&doc, "stdio.h");
    assert_eq!(stdio["group"], "");
}

#[test]
fn test_seed_gives_identical_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "x.c", "#include \"y.h\"\n#include <string.h>\n");
    write(dir.path(), "y.h", "");

    let first = export_json(dir.path(), &[".", "--seed", "4"]);
    let second = export_json(dir.path(), &[".", "--seed", "4"]);
    assert_eq!(first, second);
}

#[test]
fn test_export_to_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.c", "#include <stdlib.h>\n");

    let output = incgraph(dir.path(), &["export", ".", "--output", "out/graph.json"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(dir.path().join("out/graph.json")).unwrap();
    let doc: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib/a.h", "#include \"b.h\"\n");
    write(dir.path(), "lib/b.h", "");
    write(
        dir.path(),
        "incgraph.toml",
        "[scan]\nroots = [\"lib\"]\n\n[graph]\nrelation = \"includes\"\nfull_path = true\n",
    );

    let doc = export_json(dir.path(), &["--config", "incgraph.toml"]);

    let edge = &doc["edges"][0];
    let source = &doc["nodes"][edge["source"].as_u64().unwrap() as usize];
    assert!(source["label"].as_str().unwrap().ends_with("a.h"));
    assert!(source["label"].as_str().unwrap().len() > "a.h".len());
}

#[test]
fn test_index_reports_counts() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.c", "#include \"a.h\"\n");
    write(dir.path(), "a.h", "");

    let output = incgraph(dir.path(), &["index", "."]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("<Graph: nodes = 2, edges = 1>"));
    assert!(stdout.contains("files scanned:       2"));
}

#[test]
fn test_invalid_configuration_is_fatal() {
    let dir = TempDir::new().unwrap();

    let missing = incgraph(dir.path(), &["export", "does-not-exist"]);
    assert!(!missing.status.success());
    assert!(missing.stdout.is_empty());

    let no_roots = incgraph(dir.path(), &["export"]);
    assert!(!no_roots.status.success());

    let bad_alpha = incgraph(dir.path(), &["export", ".", "--color-alpha-min", "3"]);
    assert!(!bad_alpha.status.success());

    let bad_colors = incgraph(dir.path(), &["export", ".", "--colors", "1,2"]);
    assert!(!bad_colors.status.success());

    let negative = incgraph(dir.path(), &["export", ".", "--group-granularity", "-1"]);
    assert!(!negative.status.success());
}

#[test]
fn test_unreadable_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ok.c", "#include <ok.h>\n");
    fs::write(dir.path().join("bad.h"), [0xC3, 0x28, 0xFF]).unwrap();

    let doc = export_json(dir.path(), &["."]);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 2);
}
