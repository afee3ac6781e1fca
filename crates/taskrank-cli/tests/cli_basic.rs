//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify its outputs. Every run points
//! `--config` at a temporary directory so the user's config is never read.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::{json, Value};

/// Run a CLI command with optional stdin and return (code, stdout, stderr).
fn run_cli(config: &Path, args: &[&str], stdin: Option<&str>) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_taskrank"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            // The CLI may exit before reading (argument errors).
            let _ = pipe.write_all(input.as_bytes());
        }
    }

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn config_in(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("engine.toml")
}

#[test]
fn test_score_single_task() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &["score"],
        Some(r#"{"title": "Urgent", "importance": 9, "deadline": 1, "estimated_time": 2}"#),
    );
    assert_eq!(code, 0, "score failed");

    let scored: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(scored["priority_score"], json!(79.83));
    assert_eq!(scored["category"], json!("High Priority"));
    assert_eq!(scored["title"], json!("Urgent"));
}

#[test]
fn test_score_rejects_non_object() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(&config_in(&dir), &["score"], Some("[1, 2]"));
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"), "stderr was: {stderr}");
}

#[test]
fn test_prioritize_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = dir.path().join("tasks.json");
    std::fs::write(
        &tasks,
        json!([
            {"id": 1, "importance": 2, "deadline": 30, "estimated_time": 5},
            {"id": 2, "importance": 9, "deadline": 1, "estimated_time": 2},
            {"id": 3, "importance": 10, "deadline": 1, "estimated_time": 20}
        ])
        .to_string(),
    )
    .unwrap();

    let (code, stdout, _) = run_cli(&config_in(&dir), &["prioritize", tasks.to_str().unwrap()], None);
    assert_eq!(code, 0, "prioritize failed");

    let ranked: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<&Value> = ranked.iter().map(|t| &t["id"]).collect();
    assert_eq!(ids, vec![&json!(3), &json!(2), &json!(1)]);
    assert_eq!(ranked[0]["feasible"], json!(false));
}

#[test]
fn test_prioritize_empty_batch() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&config_in(&dir), &["prioritize"], Some("[]"));
    assert_eq!(code, 0);
    assert_eq!(serde_json::from_str::<Value>(&stdout).unwrap(), json!([]));
}

#[test]
fn test_prioritize_strict_rejects_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        &config_in(&dir),
        &["prioritize", "--strict"],
        Some(r#"[{"title": "Invalid", "importance": 11, "deadline": 5, "estimated_time": 2}]"#),
    );
    assert_ne!(code, 0);
    assert!(stdout.contains("Importance must be between 1 and 10."));
    assert!(stderr.contains("failed validation"));
}

#[test]
fn test_prioritize_stored_writes_back() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = dir.path().join("stored.json");
    std::fs::write(
        &tasks,
        json!([
            {"id": 1, "title": "Task 1", "importance": 8, "deadline": 2, "estimated_time": 2},
            {"id": 2, "title": "Task 2", "importance": 3, "deadline": 20, "estimated_time": 5},
            {"id": 3, "title": "Done", "importance": 9, "deadline": 0, "estimated_time": 1, "is_completed": true}
        ])
        .to_string(),
    )
    .unwrap();

    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &["prioritize", "--stored", "--write", tasks.to_str().unwrap()],
        None,
    );
    assert_eq!(code, 0, "prioritize --stored failed");

    let ranked: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["title"], json!("Task 1"));

    let saved: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&tasks).unwrap()).unwrap();
    assert_eq!(saved[0]["category"], json!("High Priority"));
    assert_eq!(saved[1]["category"], json!("Low Priority"));
    assert_eq!(saved[2]["category"], json!("Pending"));
}

#[test]
fn test_prioritize_write_requires_file() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(&config_in(&dir), &["prioritize", "--stored", "--write"], Some("[]"));
    assert_ne!(code, 0);
    assert!(stderr.contains("--write needs a file argument"));
}

#[test]
fn test_rank_scored_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let (_, scored, _) = run_cli(
        &config,
        &["score"],
        Some(r#"[{"id": "a", "importance": 3, "deadline": 5}, {"id": "b", "importance": 7, "deadline": 5}]"#),
    );

    let (code, stdout, _) = run_cli(&config, &["rank"], Some(&scored));
    assert_eq!(code, 0, "rank failed");
    let ranked: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ranked[0]["id"], json!("b"));
}

#[test]
fn test_validate_reports_split() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &["validate"],
        Some(
            r#"[{"title": "Valid", "importance": 5, "deadline": 5, "estimated_time": 2},
                {"title": "Invalid", "importance": 11, "deadline": 5, "estimated_time": 2}]"#,
        ),
    );
    assert_eq!(code, 1);
    let report: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["valid_count"], json!(1));
    assert_eq!(report["invalid_count"], json!(1));
}

#[test]
fn test_validate_all_valid() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(
        &config_in(&dir),
        &["validate"],
        Some(r#"[{"title": "Valid", "importance": 5, "deadline": 5, "estimated_time": 2}]"#),
    );
    assert_eq!(code, 0);
}

#[test]
fn test_config_set_get_and_reject() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let (code, stdout, _) = run_cli(&config, &["config", "get", "weights.importance"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "0.45");

    let (code, _, _) = run_cli(&config, &["config", "set", "capacity.hours_per_day", "6"], None);
    assert_eq!(code, 0);
    assert!(config.exists());

    let (_, stdout, _) = run_cli(&config, &["config", "get", "capacity.hours_per_day"], None);
    assert_eq!(stdout.trim(), "6.0");

    let (code, _, stderr) = run_cli(&config, &["config", "set", "weights.effort", "0.9"], None);
    assert_ne!(code, 0);
    assert!(stderr.contains("weights"));

    let (code, _, _) = run_cli(&config, &["config", "get", "weights.nope"], None);
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_weights_together() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let (code, _, stderr) = run_cli(
        &config,
        &["config", "set", "weights.importance", "0.6", "weights.urgency", "0.3"],
        None,
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let (_, stdout, _) = run_cli(&config, &["config", "get", "weights.urgency"], None);
    assert_eq!(stdout.trim(), "0.3");

    let (code, stdout, _) = run_cli(
        &config,
        &["score"],
        Some(r#"{"importance": 9, "deadline": 1, "estimated_time": 2}"#),
    );
    assert_eq!(code, 0);
    let scored: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(scored["priority_score"], json!(81.33));

    let (code, _, stderr) = run_cli(
        &config,
        &["config", "set", "weights.effort", "0.2", "weights.urgency"],
        None,
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("KEY VALUE"));
}

#[test]
fn test_config_changes_feasibility() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    run_cli(&config, &["config", "set", "capacity.hours_per_day", "4"], None);

    let (code, stdout, _) = run_cli(
        &config,
        &["score"],
        Some(r#"{"importance": 5, "deadline": 1, "estimated_time": 6}"#),
    );
    assert_eq!(code, 0);
    let scored: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(scored["feasible"], json!(false));
    assert_eq!(
        scored["reason"],
        json!("Estimated time (6h) exceeds available time (4h at 4h/day).")
    );
}

#[test]
fn test_config_path_uses_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let (code, stdout, _) = run_cli(&config, &["config", "path"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), config.to_str().unwrap());
}
