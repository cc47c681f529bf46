//! District grouping, pagination, and page rendering.
use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::dataset::{build_dataset, DatasetSources, SchoolRecord};
use crate::report::plots::{render, scatter_with_highlight, ScatterPage};

/// X-axis caption shared by every page.
pub const X_LABEL: &str = "Percent Free or Reduced Priced Meals";
/// Y-axis caption shared by every page.
pub const Y_LABEL: &str = "Percent Met Math Standard";
/// Legend entry for the statewide layer.
const POPULATION_LABEL: &str = "All WA Schools";

/// What one [`ReportGenerator::generate`] run produced.
#[derive(Debug)]
pub struct ReportSummary {
    pub districts: usize,
    pub written: Vec<PathBuf>,
}

/// Renders one scatter page per (district, page) into the output directory.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build the dataset once, then draw every district's pages.
    ///
    /// The first page that fails to render aborts the remaining pages and
    /// districts; pages already written stay on disk.
    pub fn generate(&self) -> Result<ReportSummary> {
        let cfg = &self.config;
        let sources = DatasetSources {
            demographics: cfg.demographics_file.clone(),
            test_results: cfg.results_file.clone(),
        };
        let records = build_dataset(&sources, cfg.grade, cfg.min_enrollment, cfg.min_test_takers)?;

        let label = grade_label(cfg.grade);
        let (population_x, population_y, _) = math_points(&records);

        let names = districts(&records);
        let mut written = Vec::new();
        for district in &names {
            let subset = district_records(&records, district);
            let pages = page_count(subset.len(), cfg.max_subset);
            for (index, chunk) in subset.chunks(cfg.max_subset).enumerate() {
                let page = index + 1;
                let (subset_x, subset_y, school_names) = math_points(chunk.iter().copied());
                let filename = report_filename(district, &label, page, pages);
                let title = report_title(district, &label, cfg.min_enrollment, page, pages);
                let path = cfg.output_dir.join(&filename);

                let plot = scatter_with_highlight(&ScatterPage {
                    population_x: &population_x,
                    population_y: &population_y,
                    population_label: POPULATION_LABEL,
                    subset_x: &subset_x,
                    subset_y: &subset_y,
                    subset_labels: &school_names,
                    subset_label: district,
                    title: &title,
                    x_label: X_LABEL,
                    y_label: Y_LABEL,
                    highlight_color: &cfg.highlight_color,
                    show_subset: true,
                    show_legend: true,
                    show_trend: true,
                })
                .map_err(anyhow::Error::msg)?;

                render(&plot, &path, true).with_context(|| {
                    format!("Failed to render page {} of {} for {}", page, pages, district)
                })?;
                log::debug!("Wrote {}", path.display());
                written.push(path);
            }
        }

        log::info!(
            "Wrote {} report pages across {} districts to {}",
            written.len(),
            names.len(),
            cfg.output_dir.display()
        );
        Ok(ReportSummary {
            districts: names.len(),
            written,
        })
    }
}

/// Produce the full report set.
///
/// Currently this is the grade 8 set only; other grades are generated by
/// configuring [`ReportGenerator`] directly.
pub fn generate_all_reports(mut config: ReportConfig) -> Result<ReportSummary> {
    config.grade = 8;
    ReportGenerator::new(config).generate()
}

/// Ordinal label for a grade: `"3rd"` for grade 3, otherwise `"{grade}th"`.
///
/// Grades 1 and 2 therefore render as `"1th"` and `"2th"`; the label is
/// purely cosmetic.
pub fn grade_label(grade: i32) -> String {
    if grade == 3 {
        "3rd".to_string()
    } else {
        format!("{}th", grade)
    }
}

/// Number of pages needed for `len` schools at `max_subset` per page.
pub fn page_count(len: usize, max_subset: usize) -> usize {
    len.div_ceil(max_subset)
}

/// Distinct district names, sorted ascending.
pub fn districts(records: &[SchoolRecord]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for record in records {
        names.insert(record.district.clone());
    }
    names.into_iter().collect()
}

/// The income-ordered selection of `records` belonging to one district.
pub fn district_records<'a>(records: &'a [SchoolRecord], district: &str) -> Vec<&'a SchoolRecord> {
    records.iter().filter(|r| r.district == district).collect()
}

/// Output file name for one page.
pub fn report_filename(district: &str, grade_label: &str, page: usize, pages: usize) -> String {
    if pages > 1 {
        format!(
            "SBA {} Schools {} Grade Math 2015 {} of {}.png",
            district, grade_label, page, pages
        )
    } else {
        format!("SBA {} Schools {} Grade Math 2015.png", district, grade_label)
    }
}

/// Chart title for one page.
pub fn report_title(
    district: &str,
    grade_label: &str,
    min_enrollment: u32,
    page: usize,
    pages: usize,
) -> String {
    let highlighted = if pages > 1 {
        format!("{} Schools Highlighted {} of {}", district, page, pages)
    } else {
        format!("{} Schools Highlighted", district)
    };
    format!(
        "WA Public Schools with {} Graders with {}+ Students \n 2015 SBA Results ({})",
        grade_label, min_enrollment, highlighted
    )
}

/// Plottable (x, y, school name) triples: records without a math score are
/// skipped so every marker has both coordinates.
fn math_points<'a, I>(records: I) -> (Vec<f64>, Vec<f64>, Vec<String>)
where
    I: IntoIterator<Item = &'a SchoolRecord>,
{
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut labels = Vec::new();
    for record in records {
        let Some(met) = record.math_percent_met_standard else {
            continue;
        };
        x.push(record.percent_free_or_reduced_meals);
        y.push(met);
        labels.push(record.school.clone());
    }
    (x, y, labels)
}
