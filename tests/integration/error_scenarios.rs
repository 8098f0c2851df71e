//! Configuration and validation failures exit non-zero with empty stdout.

use crate::common::{TestDataHome, bare_cmd};
use predicates::prelude::*;

#[test]
fn test_data_home_not_set() {
    bare_cmd()
        .arg("ru01-20210101T1200")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("GLIDER_DATA_HOME environment variable not set"));
}

#[test]
fn test_data_home_option_overrides_environment() {
    let data = TestDataHome::new().unwrap();

    bare_cmd()
        .env("GLIDER_DATA_HOME", "/nonexistent/data/home")
        .arg(data.deployment())
        .arg("--data-home")
        .arg(data.fixture.data_home())
        .assert()
        .success();
}

#[test]
fn test_invalid_template() {
    let data = TestDataHome::new().unwrap();

    data.cmd()
        .args(["-t", "/nonexistent/gliders.xml"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid XML template"));
}

#[test]
fn test_missing_deployment_home() {
    let data = TestDataHome::new().unwrap();

    bare_cmd()
        .env("GLIDER_DATA_HOME", data.fixture.data_home())
        .arg("ru99-20210101T1200")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid data set home"));
}

#[test]
fn test_missing_deployments_root() {
    let temp = tempfile::TempDir::new().unwrap();

    bare_cmd()
        .env("GLIDER_DATA_HOME", temp.path())
        .arg("ru01-20210101T1200")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid deployment data sets home"));
}

#[test]
fn test_missing_definitions_file() {
    let data = TestDataHome::new().unwrap();

    data.cmd()
        .args(["--level", "sci"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("sci-trajectory-var_defs.yml"));
}

#[test]
fn test_missing_required_variables() {
    let data = TestDataHome::new().unwrap();
    data.write_definitions("raw", "trajectory", &["time", "latitude", "longitude", "depth", "trajectory"])
        .unwrap();

    data.cmd()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Missing required variable source_file"))
        .stderr(predicate::str::contains("Missing required variable platform"));
}

#[test]
fn test_duplicate_variable_names() {
    let data = TestDataHome::new().unwrap();
    data.write_file(
        "config/raw-trajectory-var_defs.yml",
        "- name: time\n  attrs: {}\n- name: time\n  attrs: {}\n",
    )
    .unwrap();

    data.cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("defined more than once"));
}

#[test]
fn test_unparseable_definitions() {
    let data = TestDataHome::new().unwrap();
    data.write_file("config/raw-trajectory-var_defs.yml", "time: [unclosed\n").unwrap();

    data.cmd()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn test_missing_categories_file() {
    let data = TestDataHome::new().unwrap();

    data.cmd()
        .args(["--ioos-categories", "/nonexistent/ioos_categories.yml"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_template_with_unknown_variable() {
    let data = TestDataHome::new().unwrap();
    let template = data.write_file("bad.xml", "<dataset>{{ dataset.titel }}</dataset>").unwrap();

    data.cmd()
        .arg("-t")
        .arg(&template)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("dataset.titel"))
        .stderr(predicate::str::contains("dataset.title"));
}

#[test]
fn test_invalid_choice_is_usage_error() {
    bare_cmd()
        .args(["ru01-20210101T1200", "--level", "l2"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
