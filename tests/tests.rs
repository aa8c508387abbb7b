use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

fn run_pipeline(input_dir: &str, out_dir: &Path, extra_args: &[&str]) -> std::process::Output {
    Command::new(assert_cmd::cargo::cargo_bin!("invoice_pipeline"))
        .arg("--input-dir")
        .arg(input_dir)
        .arg("--output-csv")
        .arg(out_dir.join("report.csv"))
        .arg("--log-file")
        .arg(out_dir.join("run.log"))
        .args(extra_args)
        .assert()
        .success()
        .get_output()
        .clone()
}

fn read_csv(out_dir: &Path) -> String {
    fs::read_to_string(out_dir.join("report.csv")).unwrap()
}

// ============================================================================
// Setup Error Tests
// ============================================================================

#[test]
fn test_missing_input_dir_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    Command::new(assert_cmd::cargo::cargo_bin!("invoice_pipeline"))
        .arg("--offline")
        .arg("--input-dir")
        .arg("no/such/dir")
        .arg("--output-csv")
        .arg(tmp.path().join("report.csv"))
        .arg("--log-file")
        .arg(tmp.path().join("run.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("input directory not found"));
}

// ============================================================================
// Offline Run Tests
// ============================================================================

#[test]
fn test_mixed_batch_offline() {
    let tmp = tempfile::tempdir().unwrap();
    run_pipeline("tests/fixtures/mixed", tmp.path(), &["--offline"]);

    let csv = read_csv(tmp.path());
    let lines: Vec<&str> = csv.lines().collect();

    // header + 4 json files; notes.txt is ignored
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("id,amount,currency,date,valid,reasons,post_status"));

    // valid invoice, posting disabled
    let inv001 = lines.iter().find(|l| l.contains("INV001")).unwrap();
    assert!(inv001.contains(",valid,"));
    assert!(inv001.contains("skipped"));
    assert!(inv001.ends_with("inv001.json"));

    // negative amount
    let inv002 = lines.iter().find(|l| l.contains("INV002")).unwrap();
    assert!(inv002.contains(",invalid,"));
    assert!(inv002.contains("amount must be non-negative"));
    assert!(inv002.contains("not attempted"));

    // missing currency and date, one reason each
    let inv003 = lines.iter().find(|l| l.contains("INV003")).unwrap();
    assert!(inv003.contains("missing required field: currency"));
    assert!(inv003.contains("missing required field: date"));

    // unparseable file still gets a row
    let broken = lines.iter().find(|l| l.contains("broken.json")).unwrap();
    assert!(broken.contains(",invalid,"));
    assert!(broken.contains("invalid JSON"));
    assert!(broken.contains("not attempted"));

    assert!(!csv.contains("notes.txt"));
}

#[test]
fn test_one_row_per_file_matched_by_id() {
    let tmp = tempfile::tempdir().unwrap();
    run_pipeline("tests/fixtures/valid_batch", tmp.path(), &["--offline"]);

    let csv = read_csv(tmp.path());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);

    for id in ["INV-A", "INV-B", "INV-C"] {
        assert_eq!(csv.matches(id).count(), 1, "expected exactly one row for {}", id);
    }
    // every valid record is skipped, none posted
    for line in &lines[1..] {
        assert!(line.contains(",valid,"));
        assert!(line.contains("skipped"));
    }
}

#[test]
fn test_offline_summary_counts() {
    let tmp = tempfile::tempdir().unwrap();
    let output = run_pipeline("tests/fixtures/mixed", tmp.path(), &["--offline"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("Loaded:        3"));
    assert!(stdout.contains("Load failures: 1"));
    assert!(stdout.contains("Valid:         1"));
    assert!(stdout.contains("Invalid:       2"));
    assert!(stdout.contains("Posted:        0"));
    assert!(stdout.contains("Skipped:       1"));
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_reruns_produce_identical_csv() {
    let tmp = tempfile::tempdir().unwrap();

    run_pipeline("tests/fixtures/mixed", tmp.path(), &["--offline"]);
    let first = read_csv(tmp.path());

    run_pipeline("tests/fixtures/mixed", tmp.path(), &["--offline"]);
    let second = read_csv(tmp.path());

    assert_eq!(first, second);
}

#[test]
fn test_log_file_appends_across_runs() {
    let tmp = tempfile::tempdir().unwrap();

    run_pipeline("tests/fixtures/valid_batch", tmp.path(), &["--offline"]);
    run_pipeline("tests/fixtures/valid_batch", tmp.path(), &["--offline"]);

    let log = fs::read_to_string(tmp.path().join("run.log")).unwrap();
    assert_eq!(log.matches("run complete").count(), 2);
}

// ============================================================================
// Transport Failure Tests
// ============================================================================

#[test]
fn test_transport_failure_does_not_stop_run() {
    let tmp = tempfile::tempdir().unwrap();
    // discard port, connection refused without touching the network
    let output = run_pipeline(
        "tests/fixtures/valid_batch",
        tmp.path(),
        &["--endpoint", "http://127.0.0.1:9/post"],
    );

    let csv = read_csv(tmp.path());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);

    // every invoice was attempted and recorded despite the failures
    for line in &lines[1..] {
        assert!(line.contains(",valid,"));
        assert!(line.contains("failed"));
    }

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Post failures: 3"));

    let log = fs::read_to_string(tmp.path().join("run.log")).unwrap();
    assert_eq!(log.matches("post failed for invoice").count(), 3);
}
