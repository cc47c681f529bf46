//! Building the merged per-school dataset.
//!
//! Two CSV sources (school demographics and SBA test results) are projected
//! to their relevant columns, inner-joined on building number, filtered by
//! enrollment and test-taker thresholds, and sorted ascending by the free or
//! reduced-price meals percentage.
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use anyhow::Result;

use crate::error::ReportError;
use crate::io::read_projected;

/// Grade used by [`build_default_dataset`].
pub const DEFAULT_GRADE: i32 = 8;
/// Enrollment floor used by [`build_default_dataset`].
pub const DEFAULT_MIN_ENROLLMENT: u32 = 200;
/// Per-subject test-taker floor used by [`build_default_dataset`].
pub const DEFAULT_MIN_TEST_TAKERS: u32 = 10;

/// Column order of the demographics projection.
const DEMOGRAPHIC_COLUMNS: [&str; 5] = [
    "PercentFreeorReducedPricedMeals",
    "District",
    "School",
    "BuildingNumber",
    "TotalEnrollment",
];

/// Column order of the test-results projection.
const RESULT_COLUMNS: [&str; 8] = [
    "GradeTested",
    "MathPercentMetStandardIncludingPrevPass",
    "MathPercentLevel4",
    "MathTotalTested",
    "ELAPercentMetStandardIncludingPrevPass",
    "ELAPercentLevel4",
    "ELATotalTested",
    "BuildingNumber",
];

/// Paths to the two source tables for one build.
#[derive(Debug, Clone)]
pub struct DatasetSources {
    pub demographics: PathBuf,
    pub test_results: PathBuf,
}

/// One school's demographic and SBA snapshot after the merge.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolRecord {
    pub building_number: String,
    pub district: String,
    pub school: String,
    pub percent_free_or_reduced_meals: f64,
    pub total_enrollment: u32,
    pub math_percent_met_standard: Option<f64>,
    pub math_percent_level4: Option<f64>,
    pub math_total_tested: u32,
    pub ela_percent_met_standard: Option<f64>,
    pub ela_percent_level4: Option<f64>,
    pub ela_total_tested: u32,
}

struct DemographicRow {
    percent_meals: f64,
    district: String,
    // Empty when the source field is blank; such rows are filtered out.
    school: String,
    building_number: String,
    total_enrollment: u32,
}

struct ResultRow {
    math_percent_met_standard: Option<f64>,
    math_percent_level4: Option<f64>,
    math_total_tested: u32,
    ela_percent_met_standard: Option<f64>,
    ela_percent_level4: Option<f64>,
    ela_total_tested: u32,
    building_number: String,
}

/// Build the merged dataset with the standard thresholds
/// (grade 8, enrollment over 200, more than 10 test takers per subject).
pub fn build_default_dataset(sources: &DatasetSources) -> Result<Vec<SchoolRecord>> {
    build_dataset(
        sources,
        DEFAULT_GRADE,
        DEFAULT_MIN_ENROLLMENT,
        DEFAULT_MIN_TEST_TAKERS,
    )
}

/// Build the merged, filtered, income-sorted school table.
///
/// A school appears only when its building number is present in both sources
/// for the requested grade, its enrollment exceeds `min_enrollment`, both
/// subjects exceed `min_test_takers` tested students, and its name is
/// non-empty. An empty result is [`ReportError::EmptyResult`], never a
/// silently empty table.
pub fn build_dataset(
    sources: &DatasetSources,
    grade: i32,
    min_enrollment: u32,
    min_test_takers: u32,
) -> Result<Vec<SchoolRecord>> {
    let demographics = read_projected(&sources.demographics, &DEMOGRAPHIC_COLUMNS, |row| {
        Ok(Some(DemographicRow {
            percent_meals: row.parse(0)?,
            district: row.get(1).to_string(),
            school: row.get(2).to_string(),
            building_number: row.get(3).to_string(),
            total_enrollment: row.parse(4)?,
        }))
    })?;

    let results = read_projected(&sources.test_results, &RESULT_COLUMNS, |row| {
        let row_grade: i32 = row.parse(0)?;
        if row_grade != grade {
            return Ok(None);
        }
        Ok(Some(ResultRow {
            math_percent_met_standard: row.parse_opt(1)?,
            math_percent_level4: row.parse_opt(2)?,
            math_total_tested: row.parse(3)?,
            ela_percent_met_standard: row.parse_opt(4)?,
            ela_percent_level4: row.parse_opt(5)?,
            ela_total_tested: row.parse(6)?,
            building_number: row.get(7).to_string(),
        }))
    })?;

    let mut by_building: HashMap<&str, &ResultRow> = HashMap::with_capacity(results.len());
    for row in &results {
        by_building.entry(row.building_number.as_str()).or_insert(row);
    }

    // Demographics drive the join order; the income sort below is stable,
    // so equal-income records keep this order.
    let mut records = Vec::new();
    for demo in &demographics {
        let Some(result) = by_building.get(demo.building_number.as_str()) else {
            continue;
        };
        if demo.total_enrollment <= min_enrollment
            || result.math_total_tested <= min_test_takers
            || result.ela_total_tested <= min_test_takers
            || demo.school.is_empty()
        {
            continue;
        }
        records.push(SchoolRecord {
            building_number: demo.building_number.clone(),
            district: demo.district.clone(),
            school: demo.school.clone(),
            percent_free_or_reduced_meals: demo.percent_meals,
            total_enrollment: demo.total_enrollment,
            math_percent_met_standard: result.math_percent_met_standard,
            math_percent_level4: result.math_percent_level4,
            math_total_tested: result.math_total_tested,
            ela_percent_met_standard: result.ela_percent_met_standard,
            ela_percent_level4: result.ela_percent_level4,
            ela_total_tested: result.ela_total_tested,
        });
    }

    if records.is_empty() {
        return Err(ReportError::EmptyResult { grade }.into());
    }

    records.sort_by(|a, b| {
        a.percent_free_or_reduced_meals
            .partial_cmp(&b.percent_free_or_reduced_meals)
            .unwrap_or(Ordering::Equal)
    });

    let district_count = records
        .iter()
        .map(|r| r.district.as_str())
        .collect::<HashSet<_>>()
        .len();
    log::info!(
        "Built dataset: {} schools across {} districts (grade {})",
        records.len(),
        district_count,
        grade
    );

    Ok(records)
}
