//! Integration test: run the `pipedeploy` binary and check exit codes and
//! report output for each subcommand.

use std::io::Write;
use std::process::{Command, Output};

fn pipedeploy(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pipedeploy"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pipedeploy")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn args_valid_window_exits_zero() {
    let out = pipedeploy(&[
        "args",
        "--module",
        "test_module",
        "--start-date",
        "2022-01-27",
        "--end-date",
        "2022-01-27",
    ]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).starts_with("OK: command-line arguments"));
}

#[test]
fn args_reversed_window_exits_one() {
    let out = pipedeploy(&[
        "args",
        "--module",
        "test_module",
        "--start-date",
        "2022-01-05",
        "--end-date",
        "2022-01-01",
    ]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.starts_with("FAIL: command-line arguments"));
    assert!(text.contains("2022-01-05 > 2022-01-01"));
}

#[test]
fn args_optional_dates_json_output() {
    let out = pipedeploy(&[
        "--format",
        "json",
        "args",
        "--module",
        "stream_events",
        "--optional-dates",
    ]);
    assert_eq!(out.status.code(), Some(0));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(parsed["schema"], "optional_date_commandline");
    assert_eq!(parsed["record"]["start_date"], serde_json::Value::Null);
}

#[test]
fn config_file_validation() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(
        br#"{
            "data_processor_name": "test",
            "main_transformation_name": "test",
            "output_data_path": "test/test",
            "output_schema_path": "test.yaml"
        }"#,
    )
    .unwrap();
    let path = file.path().to_str().unwrap();

    let out = pipedeploy(&["config", path, "--kind", "pipeline"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("output_schema_path: incorrect file format"));
}

#[test]
fn config_missing_file_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    let out = pipedeploy(&["config", missing.to_str().unwrap(), "--kind", "transformation"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
}

#[test]
fn version_exit_codes() {
    assert_eq!(pipedeploy(&["version", "0.1.0-rc1"]).status.code(), Some(0));
    assert_eq!(pipedeploy(&["version", "1.0.0-rc.1"]).status.code(), Some(1));
}
