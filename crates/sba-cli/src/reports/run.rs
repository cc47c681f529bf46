//! CLI run helpers: config loading, overrides, and dataset output.
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use sba_reports::config::ReportConfig;
use sba_reports::dataset::{build_dataset, DatasetSources, SchoolRecord};
use sba_reports::report::{generate_all_reports, ReportGenerator, ReportSummary};

/// Optional command-line overrides applied on top of a loaded config.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub grade: Option<i32>,
    pub min_enrollment: Option<u32>,
    pub min_test_takers: Option<u32>,
    pub demographics: Option<PathBuf>,
    pub results: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Load a report configuration from a JSON file.
pub fn load_report_config<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: ReportConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Apply the overrides that were actually given to `config`.
pub fn apply_overrides(config: &mut ReportConfig, overrides: &CliOverrides) {
    if let Some(grade) = overrides.grade {
        config.grade = grade;
    }
    if let Some(min_enrollment) = overrides.min_enrollment {
        config.min_enrollment = min_enrollment;
    }
    if let Some(min_test_takers) = overrides.min_test_takers {
        config.min_test_takers = min_test_takers;
    }
    if let Some(demographics) = &overrides.demographics {
        config.demographics_file = demographics.clone();
    }
    if let Some(results) = &overrides.results {
        config.results_file = results.clone();
    }
    if let Some(output_dir) = &overrides.output_dir {
        config.output_dir = output_dir.clone();
    }
}

/// Generate the report set described by `config`.
pub fn run_report(config: ReportConfig, all: bool) -> Result<ReportSummary> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    if all {
        generate_all_reports(config)
    } else {
        ReportGenerator::new(config).generate()
    }
}

/// Build the merged dataset from the configured sources and thresholds.
pub fn run_dataset(config: &ReportConfig) -> Result<Vec<SchoolRecord>> {
    let sources = DatasetSources {
        demographics: config.demographics_file.clone(),
        test_results: config.results_file.clone(),
    };
    build_dataset(
        &sources,
        config.grade,
        config.min_enrollment,
        config.min_test_takers,
    )
}

/// Write the merged dataset as TSV to `output`, or to stdout when `None`.
pub fn write_dataset_tsv(records: &[SchoolRecord], output: Option<&Path>) -> Result<()> {
    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(out);

    writer.write_record([
        "BuildingNumber",
        "District",
        "School",
        "PercentFreeorReducedPricedMeals",
        "TotalEnrollment",
        "MathPercentMetStandard",
        "MathPercentLevel4",
        "MathTotalTested",
        "ELAPercentMetStandard",
        "ELAPercentLevel4",
        "ELATotalTested",
    ])?;
    for record in records {
        writer.write_record(&[
            record.building_number.clone(),
            record.district.clone(),
            record.school.clone(),
            record.percent_free_or_reduced_meals.to_string(),
            record.total_enrollment.to_string(),
            opt_field(record.math_percent_met_standard),
            opt_field(record.math_percent_level4),
            record.math_total_tested.to_string(),
            opt_field(record.ela_percent_met_standard),
            opt_field(record.ela_percent_level4),
            record.ela_total_tested.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn opt_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
