//! Rendered XML for each dataset flavour.

use crate::common::TestDataHome;
use predicates::prelude::*;

const PROFILE_NAMES: &[&str] = &[
    "time",
    "latitude",
    "longitude",
    "depth",
    "trajectory",
    "profile_id",
    "profile_lat",
    "profile_lon",
    "source_file",
    "platform",
    "sci_water_temp",
    "instrument_ctd",
];

fn position(haystack: &str, needle: &str) -> usize {
    haystack.find(needle).unwrap_or_else(|| panic!("{needle} not found in output:\n{haystack}"))
}

#[test]
fn test_default_trajectory_dataset() {
    let data = TestDataHome::new().unwrap();

    let output = data.cmd().assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();

    assert!(stdout.contains("datasetID=\"ru01-20210101T1200-raw-trajectory-rt\""));
    assert!(stdout.contains("<att name=\"title\">ru01-20210101T1200 Real Time Raw Time Series</att>"));
    assert!(stdout.contains("<att name=\"cdm_data_type\">Trajectory</att>"));
    assert!(stdout.contains("<reloadEveryNMinutes>86400</reloadEveryNMinutes>"));
    assert!(stdout.contains("<updateEveryNMillis>-1</updateEveryNMillis>"));
    assert!(stdout.ends_with("</dataset>\n"));

    let platform = position(&stdout, "<sourceName>platform</sourceName>");
    let instrument = position(&stdout, "<sourceName>instrument_ctd</sourceName>");
    let conductivity = position(&stdout, "<sourceName>conductivity</sourceName>");
    let temperature = position(&stdout, "<sourceName>temperature</sourceName>");
    assert!(platform < instrument);
    assert!(instrument < conductivity);
    assert!(conductivity < temperature);
}

#[test]
fn test_logs_do_not_reach_stdout() {
    let data = TestDataHome::new().unwrap();

    data.cmd()
        .args(["-l", "debug"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<dataset "))
        .stderr(predicate::str::contains("ERDDAP CDM data type: Trajectory"));
}

#[test]
fn test_science_delayed_profile_dataset() {
    let data = TestDataHome::new().unwrap();
    data.write_definitions("sci", "profile", PROFILE_NAMES).unwrap();

    data.cmd()
        .args(["-m", "delayed", "-d", "profile", "--level", "sci", "-r", "1440", "-u", "10000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("datasetID=\"ru01-20210101T1200-sci-profile-delayed\""))
        .stdout(predicate::str::contains("Delayed Mode Science Profiles"))
        .stdout(predicate::str::contains("<att name=\"cdm_data_type\">TrajectoryProfile</att>"))
        .stdout(predicate::str::contains("temperature,depth,time&amp;time&gt;=max(time)-1days"))
        .stdout(predicate::str::contains("<reloadEveryNMinutes>1440</reloadEveryNMinutes>"))
        .stdout(predicate::str::contains("<updateEveryNMillis>10000</updateEveryNMillis>"))
        .stdout(predicate::str::contains("data/out/nc/sci-profile/delayed</fileDir>"));
}

#[test]
fn test_raw_profile_uses_raw_temperature_query() {
    let data = TestDataHome::new().unwrap();
    data.write_definitions("raw", "profile", PROFILE_NAMES).unwrap();

    data.cmd()
        .args(["-d", "profile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sci_water_temp,depth,time&amp;"))
        .stdout(predicate::str::contains("<att name=\"ioos_category\">Temperature</att>"));
}

#[test]
fn test_unknown_ioos_category() {
    let data = TestDataHome::new().unwrap();
    let mut names = PROFILE_NAMES[..10].to_vec();
    names.push("m_mystery_sensor");
    data.write_definitions("raw", "trajectory", &names).unwrap();

    let output = data.cmd().assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();

    let mystery = position(&stdout, "<sourceName>m_mystery_sensor</sourceName>");
    let unknown = position(&stdout[mystery..], "<att name=\"ioos_category\">Unknown</att>");
    let next_variable = stdout[mystery..].find("</dataVariable>").unwrap();
    assert!(unknown < next_variable);
}

#[test]
fn test_custom_template_and_categories() {
    let data = TestDataHome::new().unwrap();
    let template = data
        .write_file(
            "custom.xml",
            "{{ dataset.dataset_id }}:{% for v in variables %}{{ v.name }}={{ v.attrs.ioos_category }};{% endfor %}\n",
        )
        .unwrap();
    let categories = data.write_file("cats.yml", "temperature: Heat\n").unwrap();

    data.cmd()
        .arg("--template")
        .arg(&template)
        .arg("--ioos-categories")
        .arg(&categories)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ru01-20210101T1200-raw-trajectory-rt:time=Unknown;latitude=Unknown;",
        ))
        .stdout(predicate::str::contains("instrument_ctd=Unknown;conductivity=Unknown;temperature=Heat;\n"));
}

#[test]
fn test_explicit_definitions_file() {
    let data = TestDataHome::new().unwrap();
    let defs = data
        .fixture
        .write_definitions("elsewhere.yml", &PROFILE_NAMES[..10])
        .unwrap();

    data.cmd()
        .args(["-d", "profile", "--defs"])
        .arg(&defs)
        .assert()
        .success()
        .stdout(predicate::str::contains("<sourceName>profile_id</sourceName>"));
}

#[test]
fn test_clobber_does_not_change_output() {
    let data = TestDataHome::new().unwrap();

    let plain = data.cmd().assert().success().get_output().stdout.clone();
    let clobbered = data.cmd().arg("-c").assert().success().get_output().stdout.clone();
    assert_eq!(plain, clobbered);
}
