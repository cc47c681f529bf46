//! Run configuration for the report generator.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dataset::DEFAULT_MIN_TEST_TAKERS;

/// Enrollment floor used by report runs when none is configured.
pub const DEFAULT_REPORT_MIN_ENROLLMENT: u32 = 100;
/// Maximum schools drawn on one page.
pub const DEFAULT_MAX_SUBSET: usize = 38;

/// Central configuration for a report run.
///
/// Thresholds live here rather than as module constants so alternate values
/// need no code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub demographics_file: PathBuf,
    pub results_file: PathBuf,
    pub output_dir: PathBuf,
    pub grade: i32,
    pub min_enrollment: u32,
    pub min_test_takers: u32,
    pub max_subset: usize,
    pub highlight_color: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            demographics_file: PathBuf::from("data/school_demographics_2015.csv"),
            results_file: PathBuf::from("data/sba_results_2015.csv"),
            output_dir: PathBuf::from("reports"),
            grade: 8,
            min_enrollment: DEFAULT_REPORT_MIN_ENROLLMENT,
            min_test_takers: DEFAULT_MIN_TEST_TAKERS,
            max_subset: DEFAULT_MAX_SUBSET,
            highlight_color: "crimson".to_string(),
        }
    }
}
