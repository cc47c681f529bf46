//! sba-reports: per-district scatter reports for WA public school SBA results.
//!
//! This crate merges two tabular sources (school demographics and Smarter
//! Balanced Assessment results) into one filtered, income-sorted table of
//! per-school records, then renders one Plotly scatter page per district,
//! paginating districts too large for a single chart.
//!
//! The design favors small, testable modules: a generic CSV projection
//! loader, a pure dataset builder, and a report generator whose layout
//! helpers (pagination, labels, file names) are usable without touching the
//! plotting backend.
pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod report;
pub mod stats;
