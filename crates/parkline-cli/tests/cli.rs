use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("parkline"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn sample_log() -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join("mixed")
        .join("input.jsonl")
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_supports_analyse_and_analyze() {
    cmd()
        .args(["log", "analyse", "--help"])
        .assert()
        .success();
    cmd()
        .args(["log", "analyze", "--help"])
        .assert()
        .success();
}

#[test]
fn version_includes_build_metadata() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("parkline").and(contains(env!("CARGO_PKG_VERSION"))));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.jsonl");
    let report = temp.path().join("report.json");

    cmd()
        .args(["log", "analyze"])
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("uplinks.csv");
    std::fs::write(&input, "f_port,frm_payload\n").expect("write input");

    cmd()
        .args(["log", "analyse"])
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn stdout_outputs_report_json() {
    let assert = cmd()
        .args(["log", "analyze"])
        .arg(sample_log())
        .arg("--stdout")
        .assert()
        .success();
    let report = stdout_json(&assert);
    assert_eq!(report["report_version"], 1);
    assert_eq!(report["summary"]["uplinks_total"], 9);
    assert_eq!(report["summary"]["failed"], 1);
}

#[test]
fn glob_pattern_resolves_single_log() {
    let pattern = repo_root()
        .join("tests")
        .join("golden")
        .join("mix*")
        .join("input.jsonl");

    let assert = cmd()
        .args(["log", "analyse"])
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
    assert_eq!(stdout_json(&assert)["summary"]["decoded"], 8);
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .args(["log", "analyze"])
        .arg(sample_log())
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .args(["log", "analyze"])
        .arg(sample_log())
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_is_written_to_nested_directory() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .args(["log", "analyse"])
        .arg(sample_log())
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let written = std::fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(value["tool"]["name"], "parkline");
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .args(["log", "analyze"])
        .arg(sample_log())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn list_failures_outputs_lines() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .args(["log", "analyze"])
        .arg(sample_log())
        .arg("-o")
        .arg(report)
        .arg("--list-failures")
        .assert()
        .success()
        .stderr(contains("Decode failures:").and(contains("line 8 (port 1)")));
}

#[test]
fn strict_fails_when_failures_present() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .args(["log", "analyze"])
        .arg(sample_log())
        .arg("-o")
        .arg(report)
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("1 uplink(s) failed to decode").and(contains("--list-failures")));
}

#[test]
fn decode_hex_prints_record() {
    let assert = cmd()
        .args(["decode", "--port", "1", "--hex", "0117"])
        .assert()
        .success();
    let record = stdout_json(&assert);
    assert_eq!(record["packet_type"], "Status");
    assert_eq!(record["occupied"], true);
    assert_eq!(record["temperature"], 23);
    assert_eq!(record["bytes"], serde_json::json!([1, 23]));
}

#[test]
fn decode_base64_matches_hex() {
    let from_hex = cmd()
        .args(["decode", "--port", "6", "--hex", "654A1B00000001940005"])
        .assert()
        .success();
    let from_base64 = cmd()
        .args(["decode", "--port", "6", "--base64", "ZUobAAAAAZQABQ=="])
        .assert()
        .success();
    let record = stdout_json(&from_base64);
    assert_eq!(record, stdout_json(&from_hex));
    assert_eq!(record["packet_type"], "Debug");
    assert_eq!(record["debug_code"], 404);
}

#[test]
fn decode_requires_exactly_one_payload() {
    cmd()
        .args(["decode", "--port", "1"])
        .assert()
        .failure();
    cmd()
        .args(["decode", "--port", "1", "--hex", "0117", "--base64", "ARc="])
        .assert()
        .failure();
}

#[test]
fn decode_short_payload_reports_hint() {
    cmd()
        .args(["decode", "--port", "3", "--hex", "00"])
        .assert()
        .code(2)
        .stderr(contains("payload too short").and(contains("hint:")));
}

#[test]
fn unknown_port_decodes_to_unknown() {
    let assert = cmd()
        .args(["decode", "--port", "42", "--hex", "dead"])
        .assert()
        .success();
    let record = stdout_json(&assert);
    assert_eq!(record["packet_type"], "Unknown");
    assert_eq!(record.as_object().expect("object").len(), 3);
}
