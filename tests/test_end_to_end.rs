//! End-to-end tests running the mindmerge binary

use assert_cmd::Command;
use mindmerge::pipeline::load_dataset;
use predicates::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::{assert_canonical_schema, create_survey_dir, write_csv};

#[test]
fn test_combine_directory_writes_default_output() {
    let temp_dir = create_survey_dir();

    Command::cargo_bin("mindmerge")
        .unwrap()
        .arg("-d")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Save Results"))
        .stdout(predicate::str::contains("SAMPLE DATA (first 5 rows)"))
        .stdout(predicate::str::contains("mental_health_score"));

    let output = temp_dir.path().join("combined_mental_health_data.csv");
    let df = load_dataset(&output, 10000).unwrap();
    assert_canonical_schema(&df);
    assert_eq!(df.height(), 7);
}

#[test]
fn test_rerun_is_reproducible_and_ignores_own_output() {
    let temp_dir = create_survey_dir();
    let output = temp_dir.path().join("combined_mental_health_data.csv");

    let run = || {
        Command::cargo_bin("mindmerge")
            .unwrap()
            .arg("-d")
            .arg(temp_dir.path())
            .args(["--seed", "9"])
            .assert()
            .success();
        std::fs::read_to_string(&output).unwrap()
    };

    let first = run();
    let second = run();

    assert_eq!(first, second);
}

#[test]
fn test_report_flag_writes_json() {
    let temp_dir = create_survey_dir();
    let report = temp_dir.path().join("run.json");

    Command::cargo_bin("mindmerge")
        .unwrap()
        .arg("-d")
        .arg(temp_dir.path())
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["metadata"]["seed"], 42);
    assert_eq!(json["sources"].as_array().unwrap().len(), 2);
    assert_eq!(json["sources"][0]["name"], "dataset1");
    assert_eq!(json["students"], 7);
}

#[test]
fn test_unreadable_source_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_csv(temp_dir.path(), "survey.csv", common::SURVEY_WIDE);
    let missing = temp_dir.path().join("missing.csv");

    Command::cargo_bin("mindmerge")
        .unwrap()
        .arg("-d")
        .arg(temp_dir.path())
        .arg("-f")
        .arg(&good)
        .arg("-f")
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped"));

    let output = temp_dir.path().join("combined_mental_health_data.csv");
    assert_eq!(load_dataset(&output, 10000).unwrap().height(), 3);
}

#[test]
fn test_empty_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("mindmerge")
        .unwrap()
        .arg("-d")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No datasets loaded"));

    assert!(!temp_dir
        .path()
        .join("combined_mental_health_data.csv")
        .exists());
}

#[test]
fn test_inspect_writes_nothing() {
    let temp_dir = create_survey_dir();

    Command::cargo_bin("mindmerge")
        .unwrap()
        .arg("inspect")
        .arg("-d")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("depression_score"));

    assert!(!temp_dir
        .path()
        .join("combined_mental_health_data.csv")
        .exists());
}
