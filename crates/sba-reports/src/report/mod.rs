//! Report generation: district grouping, pagination, and Plotly pages.
//!
//! `plots` holds small helpers converting numerical data into a
//! `plotly::Plot`; `generator` owns the per-district loop, page layout, and
//! file naming.
pub mod generator;
pub mod plots;

pub use generator::{
    district_records, districts, generate_all_reports, grade_label, page_count, report_filename,
    report_title, ReportGenerator, ReportSummary,
};
pub use plots::{render, scatter_with_highlight, ScatterPage};
