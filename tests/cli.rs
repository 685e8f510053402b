use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const GROWTH_CSV: &str = "\
Country Name,Country Code,2000,2005,2010,2015
United States,USA,4.1,3.5,2.7,2.9
China,CHN,8.5,11.4,10.6,7.0
Japan,JPN,2.8,1.7,4.1,1.6
";

fn write_csv(dir: &Path) -> PathBuf {
    let path = dir.join("growth.csv");
    fs::write(&path, GROWTH_CSV).unwrap();
    path
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("gdp-chart").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gdp-chart"));
}

#[test]
fn render_applies_flags_and_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path());
    let svg = dir.path().join("chart.svg");
    let geometry = dir.path().join("geometry.json");

    let mut cmd = Command::cargo_bin("gdp-chart").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .args(["--years", "2005:2015", "--values", "-5:12", "--hide", "Japan", "--pin", "China"])
        .arg("--svg")
        .arg(&svg)
        .arg("--geometry")
        .arg(&geometry)
        .arg("--state");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"year_min\": 2005"))
        .stdout(predicate::str::contains("\"min\": -5.0"))
        .stderr(predicate::str::contains("Loaded 3 series"));

    let svg_text = fs::read_to_string(&svg).unwrap();
    assert!(svg_text.contains("<svg"));

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&geometry).unwrap()).unwrap();
    let paths = v["paths"].as_object().unwrap();
    assert!(paths.contains_key("China"));
    assert!(!paths.contains_key("Japan"));
}

#[test]
fn render_reads_events_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path());
    let events = dir.path().join("events.json");
    fs::write(
        &events,
        r#"[{"kind": "normalize", "payload": {"enabled": true, "anchorYear": 2005}},
            {"kind": "togglePin", "payload": "Japan"}]"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("gdp-chart").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .arg("--events")
        .arg(&events)
        .arg("--state");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"normalize\": true"))
        .stdout(predicate::str::contains("Japan"));
}

#[test]
fn inverted_years_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path());

    let mut cmd = Command::cargo_bin("gdp-chart").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .args(["--years", "2025:2000"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid range"));
}

#[test]
fn missing_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("gdp-chart").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(dir.path().join("missing.csv"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot read data source"));
}
