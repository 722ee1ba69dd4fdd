//! CLI contract tests: subcommands, exit codes and the JSON schema.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("mspeak").unwrap();
    // keep a stray mspeak.toml in the test's working directory out of the way
    cmd.current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("speak"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("rules"));
}

#[test]
fn test_speak_prints_speech() {
    cli()
        .args(["speak", r"\frac{1}{2}"])
        .assert()
        .success()
        .stdout("one half\n");
}

#[test]
fn test_speak_json_has_schema_version() {
    let output = cli()
        .args(["speak", r"\int_0^1 x^2 dx", "--format", "json"])
        .output()
        .expect("Failed to run CLI");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON output");
    assert_eq!(json["schema_version"], 1);
    assert_eq!(json["ok"], true);
    assert_eq!(json["domain"], "calculus");
    assert_eq!(json["subcontext"], "integrals");
    assert!(json["applied_rules"].as_array().is_some_and(|a| !a.is_empty()));
}

#[test]
fn test_transcript_marks_voice_role() {
    cli()
        .args(["speak", r"\boxed{x = 2}", "--transcript"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[emphasis] "));
}

#[test]
fn test_bomb_exits_with_security_code() {
    let bomb = r"\frac".repeat(200);
    let output = cli()
        .args(["speak", &bomb, "--format", "json"])
        .output()
        .expect("Failed to run CLI");
    assert_eq!(output.status.code(), Some(2));

    let json: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON output");
    assert_eq!(json["ok"], false);
    assert_eq!(json["kind"], "expansion_bomb_suspected");
    assert!(json["remediation"].as_str().is_some_and(|s| !s.is_empty()));
}

#[test]
fn test_unknown_audience_is_a_usage_error() {
    cli()
        .args(["speak", "x", "--audience", "toddler"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("toddler"));
}

#[test]
fn test_batch_shares_one_session() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "% definitions first").unwrap();
    writeln!(file, "let x = 5").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "x + 1").unwrap();

    let output = cli()
        .args(["batch", "--format", "json"])
        .arg(file.path())
        .output()
        .expect("Failed to run CLI");
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).expect("one JSON document per line"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["input"], "x + 1");
    assert!(lines[1]["warnings"]
        .as_array()
        .is_some_and(|w| w.iter().all(|d| !d["message"]
            .as_str()
            .unwrap_or_default()
            .contains("undefined"))));
}

#[test]
fn test_batch_reports_first_failure_code() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r"\frac{{1}}{{2}}").unwrap();
    writeln!(file, "{}", r"\frac".repeat(200)).unwrap();

    cli()
        .arg("batch")
        .arg(file.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("one half"));
}

#[test]
fn test_rules_lists_critical_rules_first() {
    let output = cli()
        .args(["rules", "--domain", "calculus", "--format", "json"])
        .output()
        .expect("Failed to run CLI");
    assert!(output.status.success());

    let rules: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(!rules.is_empty());
    assert_eq!(rules[0]["tier"], "critical");
    assert!(rules
        .iter()
        .all(|r| r["domain"] == "calculus" || r["domain"] == "general"));
}

#[test]
fn test_cache_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("cache.bin");

    cli()
        .args(["speak", "x + 1", "--cache-file"])
        .arg(&snapshot)
        .assert()
        .success();
    assert!(snapshot.exists());
}
