//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `sba` binary to verify that argument
//! parsing, help text, and error handling work end-to-end.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("sba").unwrap()
}

const DEMOGRAPHICS: &str = "\
BuildingNumber,District,School,PercentFreeorReducedPricedMeals,TotalEnrollment
101,Auburn,Birch Middle,48.5,410
102,Bellevue,Cedar Middle,12.9,655
";

const RESULTS: &str = "\
BuildingNumber,GradeTested,MathPercentMetStandardIncludingPrevPass,MathPercentLevel4,MathTotalTested,ELAPercentMetStandardIncludingPrevPass,ELAPercentLevel4,ELATotalTested
101,8,55.3,18.8,120,60.1,20.5,122
102,8,82.6,40.2,200,85.0,44.9,198
";

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("dataset"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sba"));
}

// ---------------------------------------------------------------------------
// dataset subcommand
// ---------------------------------------------------------------------------

#[test]
fn dataset_writes_tsv_for_valid_sources() {
    let dir = tempfile::tempdir().unwrap();
    let demographics = dir.path().join("demographics.csv");
    let results = dir.path().join("results.csv");
    let output = dir.path().join("merged.tsv");
    fs::write(&demographics, DEMOGRAPHICS).unwrap();
    fs::write(&results, RESULTS).unwrap();

    cmd()
        .arg("dataset")
        .arg("-d")
        .arg(&demographics)
        .arg("-r")
        .arg(&results)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 2 schools"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("BuildingNumber\tDistrict\tSchool"));
    assert!(written.contains("Cedar Middle"));
    assert!(written.contains("Birch Middle"));
}

#[test]
fn dataset_missing_sources_fails() {
    cmd()
        .arg("dataset")
        .arg("-d")
        .arg("/nonexistent/demographics.csv")
        .arg("-r")
        .arg("/nonexistent/results.csv")
        .assert()
        .failure();
}

#[test]
fn dataset_grade_without_rows_fails() {
    let dir = tempfile::tempdir().unwrap();
    let demographics = dir.path().join("demographics.csv");
    let results = dir.path().join("results.csv");
    fs::write(&demographics, DEMOGRAPHICS).unwrap();
    fs::write(&results, RESULTS).unwrap();

    cmd()
        .arg("dataset")
        .arg("-d")
        .arg(&demographics)
        .arg("-r")
        .arg(&results)
        .arg("-g")
        .arg("5")
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// report subcommand
// ---------------------------------------------------------------------------

#[test]
fn report_missing_sources_fails_before_writing_anything() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("reports");

    cmd()
        .arg("report")
        .arg("-d")
        .arg("/nonexistent/demographics.csv")
        .arg("-r")
        .arg("/nonexistent/results.csv")
        .arg("-o")
        .arg(&output_dir)
        .assert()
        .failure();

    let entries: Vec<_> = fs::read_dir(&output_dir).unwrap().collect();
    assert!(entries.is_empty());
}

#[test]
fn report_rejects_unknown_flags() {
    cmd()
        .arg("report")
        .arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
