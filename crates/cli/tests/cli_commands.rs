use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

const HEADER: &str = "Employee ID,Preferred Name,Email - Work,Worker Corporate Title,Location Address - City,Cost Center Name,UBR Level 8,Organization Manager,Organization Manager Employee ID,Organization Manager Email,Matrix Manager,Worker Type";

fn data_dir() -> TempDir {
    let temp = TempDir::new().expect("tempdir");
    let body = format!(
        "Workforce Report\n{HEADER}\n\
         1001,Ada,,Director,London,Rates Desk,1100 Rates Trading,Grace,9,,,Employee\n\
         1002,Bo,,Analyst,Leeds,Rates Desk,1100 Rates Trading,Ada,1001,,,Employee\n\
         2001,Cy,,Associate,Paris,CCAR Team,2200 Risk,Dee,2000,,,Employee\n"
    );
    std::fs::write(temp.path().join("100 WD Report.csv"), body).expect("write report");
    temp
}

fn orgchart() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("orgchart"));
    cmd.env_remove("ORGCHART_DATA_DIR")
        .env_remove("ORGCHART_REPORT_NAME");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run orgchart");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json stdout")
}

#[test]
fn summary_lists_groups_with_keys() {
    let temp = data_dir();
    let json = stdout_json(orgchart().arg("--data-dir").arg(temp.path()).arg("summary"));

    assert_eq!(json["status"], "loaded");
    assert_eq!(json["stats"]["rows_kept"], 3);
    assert_eq!(json["groups"][0]["label"], "Rates Trading");
    assert_eq!(json["groups"][0]["key"], 100);
    assert_eq!(json["groups"][1]["label"], "Risk");
    assert_eq!(json["groups"][1]["key"], 200);
}

#[test]
fn chart_reads_data_dir_from_env() {
    let temp = data_dir();
    let json = stdout_json(
        orgchart()
            .env("ORGCHART_DATA_DIR", temp.path())
            .args(["chart", "Rates Trading", "--highlight", "1002"]),
    );

    assert_eq!(json["highlight_id"], "1002");
    assert_eq!(json["chart_data"][0]["Employee ID"], "1001");
    assert_eq!(json["chart_data"][1]["Hierarchy Rank"], 6);
}

#[test]
fn managers_prints_roster() {
    let temp = data_dir();
    let json = stdout_json(
        orgchart()
            .arg("--data-dir")
            .arg(temp.path())
            .args(["managers", "CCAR"]),
    );

    assert_eq!(json["division"], "CCAR");
    assert_eq!(json["managers"]["Dee"], serde_json::json!(["Cy"]));
}

#[test]
fn employees_prints_directory() {
    let temp = data_dir();
    let json = stdout_json(orgchart().arg("--data-dir").arg(temp.path()).arg("employees"));

    assert_eq!(json["all_employees"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["cities"], serde_json::json!(["Leeds", "London", "Paris"]));
}

#[test]
fn unknown_group_fails_with_message() {
    let temp = data_dir();
    orgchart()
        .arg("--data-dir")
        .arg(temp.path())
        .args(["chart", "Payments"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No dataset for group 'Payments'"));
}

#[test]
fn missing_report_fails_to_load() {
    let temp = TempDir::new().expect("tempdir");
    orgchart()
        .arg("--data-dir")
        .arg(temp.path())
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load '100 WD Report' report"));
}

#[test]
fn serve_refuses_non_loopback_without_public() {
    let temp = data_dir();
    orgchart()
        .arg("--data-dir")
        .arg(temp.path())
        .args(["serve", "--bind", "0.0.0.0:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to bind"));
}
