//! Integration tests for the `assign` and `eta` commands.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
}

/// Binary with a clean, colorless environment.
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("dispatch-cli").expect("binary exists");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("DISPATCH_DEPOT_LAT")
        .env_remove("DISPATCH_DEPOT_LNG")
        .env_remove("DISPATCH_SPEED_KMH")
        .env_remove("DISPATCH_MAX_ORDERS_PER_COURIER")
        .env_remove("DISPATCH_MAX_ROUNDS");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command runs");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn assign_fixture_as_text() {
    cli()
        .args(["assign"])
        .arg(fixture_path("assign_request.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Assigned 4 of 5 orders to 2 couriers (capacity_exhausted after 2 rounds)",
        ))
        .stdout(predicate::str::contains("M-001 [1]"))
        .stdout(predicate::str::contains("Unassigned:"));
}

#[test]
fn assign_fixture_as_json() {
    let body = json_stdout(
        cli()
            .args(["assign", "--format", "json"])
            .arg(fixture_path("assign_request.json")),
    );
    assert_eq!(body["stats"]["total_orders_assigned"], 4);
    assert_eq!(body["halt_reason"], "capacity_exhausted");
    assert_eq!(body["unassigned_orders"].as_array().unwrap().len(), 1);
}

#[test]
fn assign_reads_stdin() {
    let body = json_stdout(
        cli()
            .args(["--format", "json", "assign", "-"])
            .write_stdin(r#"{"motos":[{"id":1}],"orders":[{"id":"a"},{"id":"b"}]}"#),
    );
    assert_eq!(body["stats"]["total_orders_assigned"], 2);
    assert_eq!(body["assignments"][0]["order_id"], "a");
}

#[test]
fn max_orders_flag_sets_default_capacity() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("request.json");
    fs::write(
        &path,
        r#"{"motos":[{"id":1}],"orders":[{"id":1},{"id":2},{"id":3}]}"#,
    )
    .expect("write request");

    let body = json_stdout(
        cli()
            .args(["assign", "--max-orders", "2", "--format", "json"])
            .arg(&path),
    );
    assert_eq!(body["stats"]["total_orders_assigned"], 2);
    assert_eq!(body["unassigned_orders"], serde_json::json!([3]));
}

#[test]
fn depot_flag_places_records_without_coordinates() {
    let body = json_stdout(
        cli()
            .args(["--depot", "0,0", "--format", "json", "assign", "-"])
            .write_stdin(r#"{"motos":[{"id":1}],"orders":[{"id":1,"latitude":0,"longitude":1}]}"#),
    );
    assert_eq!(body["assignments"][0]["distance_km"], 111.195);
}

#[test]
fn max_rounds_env_is_honoured() {
    let body = json_stdout(
        cli()
            .env("DISPATCH_MAX_ROUNDS", "1")
            .args(["--format", "json", "assign", "-"])
            .write_stdin(r#"{"motos":[{"id":1}],"orders":[{"id":1},{"id":2}]}"#),
    );
    assert_eq!(body["halt_reason"], "round_limit");
    assert_eq!(body["rounds"], 1);
}

#[test]
fn invalid_env_configuration_fails() {
    cli()
        .env("DISPATCH_SPEED_KMH", "fast")
        .args(["eta", "--from", "0,0", "--to", "0,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DISPATCH_SPEED_KMH"));
}

#[test]
fn malformed_request_fails_with_context() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("broken.json");
    fs::write(&path, "[1, 2]").expect("write request");

    cli()
        .arg("assign")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode assignment request"));
}

#[test]
fn missing_file_fails() {
    cli()
        .args(["assign", "/no/such/request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read request"));
}

#[test]
fn eta_text_output() {
    cli()
        .args(["eta", "--from", "0,0", "--to", "0,1"])
        .assert()
        .success()
        .stdout("Distance: 111.195 km\nETA: 266.9 min at 25 km/h\n");
}

#[test]
fn eta_json_with_speed() {
    let body = json_stdout(cli().args([
        "eta", "--from", "0,0", "--to", "0,1", "--speed", "50", "--format", "json",
    ]));
    assert_eq!(body["distance_km"], 111.195);
    assert_eq!(body["eta_min"], 133.4);
    assert_eq!(body["speed_kmh"], 50.0);
}

#[test]
fn eta_zero_speed_has_no_eta() {
    cli()
        .args(["eta", "--from", "0,0", "--to", "1,0", "--speed", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no eta"));
}

#[test]
fn eta_rejects_bad_coordinates() {
    cli()
        .args(["eta", "--from", "0", "--to", "0,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LAT,LNG"));
}
