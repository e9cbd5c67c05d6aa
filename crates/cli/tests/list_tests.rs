//! Integration tests for `envpatch list`.

mod common;

use common::TestProject;
use predicates::prelude::*;

fn project() -> TestProject {
    let project = TestProject::new();
    project.write("application.yml", "a: 1\n");
    project.write("application-dev.yml", "b: 1\n");
    project.write("application-prod.yml", "b: 2\n");
    project.write("application-qa.properties", "b=3\n");
    project
}

#[test]
fn test_list_table_shows_detected_environments() {
    let project = project();

    project
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: YAML"))
        .stdout(predicate::str::contains("application-dev.yml"))
        .stdout(predicate::str::contains("application-prod.yml"))
        .stdout(predicate::str::contains("application-qa").not());
}

#[test]
fn test_list_json_reports_backups() {
    let project = project();
    project.cmd().args(["apply", "dev"]).assert().success();

    let output = project
        .cmd()
        .args(["list", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["format"], "hierarchical");
    let environments = json["environments"].as_array().unwrap();
    assert_eq!(environments.len(), 2);
    assert_eq!(environments[0]["name"], "dev");
    assert_eq!(environments[0]["backed_up"], true);
    assert_eq!(environments[1]["name"], "prod");
    assert_eq!(environments[1]["backed_up"], false);
}

#[test]
fn test_list_empty_project() {
    let project = TestProject::new();

    project
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Format: properties"))
        .stdout(predicate::str::contains("No environments found."));
}

#[test]
fn test_list_rejects_unknown_output_format() {
    let project = project();

    project
        .cmd()
        .args(["list", "-o", "xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid output format 'xml'"));
}
