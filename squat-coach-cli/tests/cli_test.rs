use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One good rep followed by one shallow rep, one frame per line
const TWO_REPS: &str = include_str!("fixtures/two_reps.jsonl");

struct Fixture {
    _dir: TempDir,
    config: PathBuf,
    jsonl: PathBuf,
    json: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[output]\ncolor = false\n").unwrap();

    let jsonl = dir.path().join("session.jsonl");
    fs::write(&jsonl, TWO_REPS).unwrap();

    let frames: Vec<serde_json::Value> = TWO_REPS
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let json = dir.path().join("session.json");
    fs::write(&json, serde_json::to_string_pretty(&frames).unwrap()).unwrap();

    Fixture {
        _dir: dir,
        config,
        jsonl,
        json,
    }
}

fn squat_coach(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("squat-coach").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("squat-coach").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("squat form analysis"))
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("squat-coach").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("squat-coach").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_squat-coach"));
}

#[test]
fn test_replay_text_output() {
    let fx = fixture();

    squat_coach(&fx.config)
        .arg("replay")
        .arg(&fx.jsonl)
        .assert()
        .success()
        .stdout(predicate::str::contains("Great form! Keep going!"))
        .stdout(predicate::str::contains("Squat deeper!"))
        .stdout(predicate::str::contains("Good reps:        1"))
        .stdout(predicate::str::contains("Bad reps:         1"))
        .stdout(predicate::str::contains("Final accuracy:   72%"))
        .stdout(predicate::str::contains("Frames processed: 10"));
}

#[test]
fn test_replay_json_array_summary_only() {
    let fx = fixture();

    let output = squat_coach(&fx.config)
        .arg("replay")
        .arg(&fx.json)
        .args(["--format", "json", "--output", "json", "--summary-only"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);

    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["summary"]["goodReps"], 1);
    assert_eq!(value["summary"]["badReps"], 1);
    assert_eq!(value["summary"]["totalReps"], 2);
    assert_eq!(value["summary"]["finalAccuracy"], 72);
}

#[test]
fn test_replay_json_snapshots() {
    let fx = fixture();

    let output = squat_coach(&fx.config)
        .arg("replay")
        .arg(&fx.jsonl)
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // Ten snapshots plus the summary
    assert_eq!(values.len(), 11);
    assert_eq!(values[0]["state"], "standing");
    assert_eq!(values[2]["state"], "bottomSquat");
    assert_eq!(values[3]["accuracy"], 77);
    assert_eq!(values[3]["feedback"]["severity"], "success");
    assert_eq!(values[8]["accuracy"], 72);
}

#[test]
fn test_replay_reset_every() {
    let fx = fixture();

    let output = squat_coach(&fx.config)
        .arg("replay")
        .arg(&fx.jsonl)
        .args(["--output", "json", "--summary-only", "--reset-every", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let summaries: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["summary"]["goodReps"], 1);
    assert_eq!(summaries[0]["summary"]["finalAccuracy"], 77);
    assert_eq!(summaries[1]["summary"]["goodReps"], 0);
    assert_eq!(summaries[1]["summary"]["badReps"], 1);
    assert_eq!(summaries[1]["summary"]["finalAccuracy"], 70);
}

#[test]
fn test_replay_missing_file() {
    let fx = fixture();

    squat_coach(&fx.config)
        .arg("replay")
        .arg("does-not-exist.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read frame file"));
}

#[test]
fn test_replay_malformed_line() {
    let fx = fixture();
    let bad = fx.jsonl.with_file_name("bad.jsonl");
    fs::write(&bad, "{\"poseScore\": 0.9, \"keypoints\": []}\n{oops\n").unwrap();

    squat_coach(&fx.config)
        .arg("replay")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_replay_rejects_invalid_config() {
    let fx = fixture();
    fs::write(&fx.config, "[engine.state]\nstanding_threshold_deg = 90.0\n").unwrap();

    squat_coach(&fx.config)
        .arg("replay")
        .arg(&fx.jsonl)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid"));
}

#[test]
fn test_config_init_show_and_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    squat_coach(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));
    assert!(path.exists());

    squat_coach(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    squat_coach(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[engine.validation]"))
        .stdout(predicate::str::contains("min_pose_score = 0.3"));

    squat_coach(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let fx = fixture();

    squat_coach(&dir.path().join("absent.toml"))
        .arg("replay")
        .arg(&fx.jsonl)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
