//! End-to-end tests for the pagina binary: generate a collection, query
//! it through views, and check rendering and error paths.

use assert_cmd::Command;
use chrono::{TimeZone, Utc};
use pagina::Record;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn pagina() -> Command {
    Command::cargo_bin("pagina").expect("binary builds")
}

fn write_fixture(dir: &TempDir) -> std::path::PathBuf {
    let created = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    let records = vec![
        Record::new(1, "Gato feliz", created)
            .with_author("ana")
            .with_engagement(10, 0),
        Record::new(2, "Bom dia grupo", created)
            .with_author("bruno")
            .with_engagement(50, 0),
        Record::new(3, "GATO bravo", created)
            .with_author("carla")
            .with_engagement(9, 0),
        Record::new(4, "Meme novo", created)
            .with_author("ana")
            .with_engagement(7, 0),
    ];
    let path = dir.path().join("items.json");
    fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();
    path
}

#[test]
fn generate_emits_the_requested_number_of_records() {
    let dir = TempDir::new().unwrap();

    let output = pagina()
        .current_dir(dir.path())
        .args(["generate", "--count", "12", "--seed", "7"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let records: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 12);
    assert_eq!(records[0]["id"], 1);
}

#[test]
fn generate_is_deterministic_apart_from_timestamps() {
    let dir = TempDir::new().unwrap();

    let run = |dir: &TempDir| -> Vec<(String, u64, u64)> {
        let output = pagina()
            .current_dir(dir.path())
            .args(["generate", "--count", "20", "--seed", "42"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let records: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
        records
            .iter()
            .map(|r| {
                (
                    r["title"].as_str().unwrap().to_string(),
                    r["likes"].as_u64().unwrap(),
                    r["comments"].as_u64().unwrap(),
                )
            })
            .collect()
    };

    assert_eq!(run(&dir), run(&dir));
}

#[test]
fn generated_data_queries_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("items.json");

    pagina()
        .current_dir(dir.path())
        .args(["generate", "--count", "30", "--seed", "1"])
        .args(["--output", input.to_str().unwrap()])
        .assert()
        .success();

    let output = pagina()
        .current_dir(dir.path())
        .args(["query", "--input", input.to_str().unwrap()])
        .args(["--view", "top", "--page", "2", "--page-size", "5"])
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let page: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["page"], 2);
    assert_eq!(page["page_size"], 5);
    assert_eq!(page["total_items"], 30);
    assert_eq!(page["total_pages"], 6);
    assert_eq!(page["has_more"], true);

    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);

    // The top view weighs likes and comments equally; scores must not
    // increase within a page.
    let scores: Vec<u64> = items
        .iter()
        .map(|r| r["likes"].as_u64().unwrap() + r["comments"].as_u64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn filter_matches_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);

    let output = pagina()
        .current_dir(dir.path())
        .args(["query", "--input", input.to_str().unwrap()])
        .args(["--filter", "gato", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let page: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["total_items"], 2);

    let titles: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Gato feliz", "GATO bravo"]);
}

#[test]
fn terminal_output_renders_a_control_strip() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);

    let output = pagina()
        .current_dir(dir.path())
        .args(["query", "--input", input.to_str().unwrap()])
        .args(["--page-size", "2", "--plain"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("feed results"));
    assert!(stdout.contains("Page 1 of 2 (items 1-2 of 4)"));
    assert!(stdout.contains("Pages: [1] 2"));
}

#[test]
fn markdown_output_lands_in_the_requested_file() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);
    let report = dir.path().join("page.md");

    pagina()
        .current_dir(dir.path())
        .args(["query", "--input", input.to_str().unwrap()])
        .args(["--format", "markdown", "--output", report.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&report).unwrap();
    assert!(content.contains("# Query Results: feed"));
    assert!(content.contains("| Bom dia grupo |"));
}

#[test]
fn unknown_view_is_a_clean_error() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);

    let output = pagina()
        .current_dir(dir.path())
        .args(["query", "--input", input.to_str().unwrap()])
        .args(["--view", "no-such-view"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown view 'no-such-view'"));
}

#[test]
fn zero_page_size_is_a_clean_error() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir);

    let output = pagina()
        .current_dir(dir.path())
        .args(["query", "--input", input.to_str().unwrap()])
        .args(["--page-size", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("page size must be at least 1"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();

    pagina().current_dir(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("pagina.toml").exists());

    let output = pagina().current_dir(dir.path()).arg("init").output().unwrap();
    assert!(!output.status.success());

    pagina()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn views_command_lists_the_builtin_catalog() {
    let dir = TempDir::new().unwrap();

    let output = pagina().current_dir(dir.path()).arg("views").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["feed", "top", "newest", "notifications", "comments"] {
        assert!(stdout.contains(name), "missing view {name}");
    }
}

#[test]
fn init_then_views_shows_configured_entries() {
    let dir = TempDir::new().unwrap();

    pagina().current_dir(dir.path()).arg("init").assert().success();

    let output = pagina().current_dir(dir.path()).arg("views").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // The starter config ships a "trending" view on top of the builtins.
    assert!(stdout.contains("trending"));
}
