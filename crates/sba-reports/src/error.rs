use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Custom error type for report pipeline failures
#[derive(Debug)]
pub enum ReportError {
    /// A source file could not be opened or read.
    DataSource { path: PathBuf, detail: String },
    /// A required column is missing from a source header row.
    MissingColumn { path: PathBuf, column: String },
    /// No schools survived the join and filters.
    EmptyResult { grade: i32 },
    /// Static image export did not produce the requested file.
    Plotting { path: PathBuf, detail: String },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportError::DataSource { path, detail } => {
                write!(f, "Failed to read data source {}: {}", path.display(), detail)
            }
            ReportError::MissingColumn { path, column } => {
                write!(f, "Missing required column '{}' in {}", column, path.display())
            }
            ReportError::EmptyResult { grade } => {
                write!(f, "No schools left after filtering grade {} results", grade)
            }
            ReportError::Plotting { path, detail } => {
                write!(f, "Failed to render {}: {}", path.display(), detail)
            }
        }
    }
}

impl Error for ReportError {}
