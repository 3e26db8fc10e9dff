#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

const GRAPH: &str = r#"{
    "users": [
        {"id": "a", "version": 1},
        {"id": "b", "version": 2},
        {"id": "c", "version": 3},
        {"id": "d", "version": 4},
        {"id": "e", "version": 5},
        {"id": "f", "version": 6},
        {"id": "h", "version": 7},
        {"id": "i", "version": 8}
    ],
    "edges": [["d", "e"], ["e", "f"], ["d", "h"], ["f", "i"]]
}"#;

fn setup_graph() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("graph.json");
    fs::write(&path, GRAPH).expect("write graph");
    (dir, path)
}

fn versions(json: &Value) -> Vec<(String, i64)> {
    json["users"]
        .as_array()
        .expect("users array")
        .iter()
        .map(|u| {
            (
                u["id"].as_str().expect("id").to_string(),
                u["version"].as_i64().expect("version"),
            )
        })
        .collect()
}

#[test]
fn stats_reports_counts() {
    let (_dir, path) = setup_graph();
    let output = cargo_bin_cmd!("contagion")
        .arg("--graph")
        .arg(&path)
        .args(["--format", "json", "stats"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(json["users"], 8);
    assert_eq!(json["edges"], 4);
    assert_eq!(json["components"], 4);
    assert_eq!(json["largest_component"], 5);
}

#[test]
fn limited_infects_small_components() {
    let (_dir, path) = setup_graph();
    let output = cargo_bin_cmd!("contagion")
        .arg("--graph")
        .arg(&path)
        .args(["--format", "json", "limited", "--budget", "4", "--version", "10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(json["result"]["infected"], 3);
    let updated: Vec<String> = versions(&json)
        .into_iter()
        .filter(|(_, v)| *v == 10)
        .map(|(id, _)| id)
        .collect();
    assert_eq!(updated, vec!["a", "b", "c"]);
}

#[test]
fn perfect_failure_exits_non_zero_and_keeps_file() {
    let (dir, path) = setup_graph();
    let out = dir.path().join("after.json");
    let assert = cargo_bin_cmd!("contagion")
        .arg("--graph")
        .arg(&path)
        .args(["perfect", "--budget", "4", "--version", "10", "--output"])
        .arg(&out)
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("sums exactly to 4"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn negative_budget_is_rejected() {
    let (_dir, path) = setup_graph();
    let assert = cargo_bin_cmd!("contagion")
        .arg("--graph")
        .arg(&path)
        .args(["limited", "--budget", "-1", "--version", "10"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("invalid argument"), "stderr: {stderr}");
}

#[test]
fn total_writes_updated_graph() {
    let (dir, path) = setup_graph();
    let out = dir.path().join("after.json");
    cargo_bin_cmd!("contagion")
        .arg("--graph")
        .arg(&path)
        .args(["total", "--start", "e", "--version", "3", "--output"])
        .arg(&out)
        .assert()
        .success();

    let saved: Value = serde_json::from_str(&fs::read_to_string(&out).expect("read")).expect("json");
    let touched: Vec<String> = versions(&saved)
        .into_iter()
        .filter(|(_, v)| *v == 3)
        .map(|(id, _)| id)
        .collect();
    // c started on version 3 already.
    assert_eq!(touched, vec!["c", "d", "e", "f", "h", "i"]);
    assert_eq!(saved["edges"].as_array().expect("edges").len(), 4);
}

#[test]
fn text_output_lists_components() {
    let (_dir, path) = setup_graph();
    let output = cargo_bin_cmd!("contagion")
        .arg("--graph")
        .arg(&path)
        .arg("components")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf8");
    assert!(text.contains("#4 representative=d size=5"), "stdout: {text}");
}

#[test]
fn missing_graph_is_reported() {
    cargo_bin_cmd!("contagion")
        .arg("stats")
        .env_remove("CONTAGION_GRAPH")
        .assert()
        .failure();
}
