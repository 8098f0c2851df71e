//! `--debug` runs validate and exit without output.

use crate::common::TestDataHome;
use erddap_dataset_xml::constants::REQUIRED_PROFILE_VARIABLES;
use predicates::prelude::*;

#[test]
fn test_dry_run_succeeds_without_output() {
    let data = TestDataHome::new().unwrap();

    data.cmd()
        .arg("-x")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Variable definitions:"));
}

#[test]
fn test_dry_run_ignores_broken_template_contents() {
    let data = TestDataHome::new().unwrap();
    let template = data.write_file("broken.xml", "{% for v in variables %}").unwrap();

    data.cmd()
        .arg("--debug")
        .arg("-t")
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_dry_run_still_validates_required_variables() {
    let data = TestDataHome::new().unwrap();
    let names: Vec<&str> =
        REQUIRED_PROFILE_VARIABLES.iter().copied().filter(|n| *n != "profile_id").collect();
    data.write_definitions("raw", "profile", &names).unwrap();

    data.cmd()
        .args(["-x", "-d", "profile"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Missing required variable profile_id"))
        .stderr(predicate::str::contains("Missing required variable profile_lat").not());
}
