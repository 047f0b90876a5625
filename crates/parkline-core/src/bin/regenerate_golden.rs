//! Rewrites `tests/golden/<case>/expected_report.json` from `input.jsonl`.
//!
//! Run from the workspace root. With no arguments every case is refreshed;
//! otherwise only the named cases are.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use parkline_core::analyze_uplink_log;

const GOLDEN_DIR: &str = "tests/golden";
const INPUT_FILE: &str = "input.jsonl";
const EXPECTED_FILE: &str = "expected_report.json";

fn main() -> ExitCode {
    let requested: Vec<String> = env::args().skip(1).collect();
    match run(&requested) {
        Ok(0) => {
            eprintln!("error: no golden cases found under {GOLDEN_DIR}");
            ExitCode::from(1)
        }
        Ok(count) => {
            eprintln!("regenerated {count} golden report(s)");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(requested: &[String]) -> Result<usize, String> {
    let cases = if requested.is_empty() {
        discover_cases(Path::new(GOLDEN_DIR))?
    } else {
        requested
            .iter()
            .map(|name| Path::new(GOLDEN_DIR).join(name))
            .collect()
    };

    for case in &cases {
        regenerate_case(case)?;
    }
    Ok(cases.len())
}

fn discover_cases(root: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(root).map_err(|err| format!("failed to read {}: {err}", root.display()))?;
    let mut cases = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("failed to read entry: {err}"))?
            .path();
        if path.join(INPUT_FILE).is_file() {
            cases.push(path);
        }
    }
    cases.sort();
    Ok(cases)
}

fn regenerate_case(case: &Path) -> Result<(), String> {
    let input = case.join(INPUT_FILE);
    let report = analyze_uplink_log(&input)
        .map_err(|err| format!("analysis failed for {}: {err}", input.display()))?;
    let json =
        serde_json::to_string(&report).map_err(|err| format!("JSON serialization failed: {err}"))?;
    let output = case.join(EXPECTED_FILE);
    fs::write(&output, json).map_err(|err| format!("failed to write {}: {err}", output.display()))
}
