//! Integration tests for CLI config loading, overrides, and the TSV writer.

use std::path::PathBuf;

use sba_cli::reports::run::{apply_overrides, load_report_config, write_dataset_tsv, CliOverrides};
use sba_reports::config::ReportConfig;
use sba_reports::dataset::SchoolRecord;

// ---------------------------------------------------------------------------
// load_report_config
// ---------------------------------------------------------------------------

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report_config.json");
    let json = serde_json::to_string_pretty(&ReportConfig::default()).unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = load_report_config(&path).unwrap();
    assert_eq!(loaded.grade, 8);
    assert_eq!(loaded.min_enrollment, 100);
}

#[test]
fn missing_config_errors() {
    assert!(load_report_config("/nonexistent/report_config.json").is_err());
}

#[test]
fn invalid_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report_config.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(load_report_config(&path).is_err());
}

// ---------------------------------------------------------------------------
// apply_overrides
// ---------------------------------------------------------------------------

#[test]
fn overrides_replace_only_given_fields() {
    let mut config = ReportConfig::default();
    let overrides = CliOverrides {
        grade: Some(5),
        min_enrollment: None,
        min_test_takers: Some(20),
        demographics: Some(PathBuf::from("alt/demographics.csv")),
        results: None,
        output_dir: None,
    };

    apply_overrides(&mut config, &overrides);

    assert_eq!(config.grade, 5);
    assert_eq!(config.min_enrollment, 100);
    assert_eq!(config.min_test_takers, 20);
    assert_eq!(config.demographics_file, PathBuf::from("alt/demographics.csv"));
    assert_eq!(config.results_file, ReportConfig::default().results_file);
}

#[test]
fn empty_overrides_change_nothing() {
    let mut config = ReportConfig::default();
    apply_overrides(&mut config, &CliOverrides::default());

    let default = ReportConfig::default();
    assert_eq!(config.grade, default.grade);
    assert_eq!(config.min_enrollment, default.min_enrollment);
    assert_eq!(config.output_dir, default.output_dir);
}

// ---------------------------------------------------------------------------
// write_dataset_tsv
// ---------------------------------------------------------------------------

fn sample_record() -> SchoolRecord {
    SchoolRecord {
        building_number: "101".to_string(),
        district: "Auburn".to_string(),
        school: "Birch Middle".to_string(),
        percent_free_or_reduced_meals: 48.5,
        total_enrollment: 410,
        math_percent_met_standard: Some(55.3),
        math_percent_level4: None,
        math_total_tested: 120,
        ela_percent_met_standard: Some(60.1),
        ela_percent_level4: Some(20.5),
        ela_total_tested: 122,
    }
}

#[test]
fn tsv_output_has_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merged.tsv");

    write_dataset_tsv(&[sample_record()], Some(&path)).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("BuildingNumber\tDistrict\tSchool"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("101\tAuburn\tBirch Middle\t48.5\t410"));
    assert_eq!(lines.next(), None);
}

#[test]
fn tsv_output_leaves_missing_scores_blank() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merged.tsv");

    write_dataset_tsv(&[sample_record()], Some(&path)).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let row = written.lines().nth(1).unwrap();
    let fields: Vec<&str> = row.split('\t').collect();
    assert_eq!(fields[5], "55.3");
    assert_eq!(fields[6], "");
    assert_eq!(fields[7], "120");
}
