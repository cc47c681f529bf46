//! Generic CSV column projection.
//!
//! Both source tables are read through [`read_projected`]: resolve the
//! requested columns against the header row, then hand each data row to a
//! mapping closure that builds a typed value (or drops the row).
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::error::ReportError;

/// One CSV row restricted to the projected column set.
///
/// Indices passed to [`RowView::get`] and friends refer to positions in the
/// projection handed to [`read_projected`], not to positions in the file.
pub struct RowView<'a> {
    record: &'a StringRecord,
    indices: &'a [usize],
    headers: &'a StringRecord,
    row: usize,
}

impl<'a> RowView<'a> {
    /// Raw field text for projected column `col`, trimmed.
    pub fn get(&self, col: usize) -> &'a str {
        self.record
            .get(self.indices[col])
            .unwrap_or_default()
            .trim()
    }

    /// Row number in the source file (1-based, header excluded).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Parse projected column `col`, naming the column and row on failure.
    pub fn parse<T: FromStr>(&self, col: usize) -> Result<T> {
        let raw = self.get(col);
        raw.parse::<T>().map_err(|_| {
            anyhow!(
                "Invalid value '{}' for column '{}' at row {}",
                raw,
                self.headers.get(self.indices[col]).unwrap_or(""),
                self.row
            )
        })
    }

    /// Like [`RowView::parse`], but an empty field is `None`.
    pub fn parse_opt<T: FromStr>(&self, col: usize) -> Result<Option<T>> {
        if self.get(col).is_empty() {
            return Ok(None);
        }
        self.parse(col).map(Some)
    }
}

/// Read `path`, project the named `columns`, and map every row through `f`.
///
/// Rows for which `f` returns `Ok(None)` are dropped. Header names are
/// matched case-insensitively; a missing column fails before any row is
/// read.
pub fn read_projected<P, T, F>(path: P, columns: &[&str], mut f: F) -> Result<Vec<T>>
where
    P: AsRef<Path>,
    F: FnMut(&RowView) -> Result<Option<T>>,
{
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ReportError::DataSource {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| ReportError::DataSource {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?
        .clone();

    let mut indices = Vec::with_capacity(columns.len());
    for &name in columns {
        let idx = find_column(&headers, name).ok_or_else(|| ReportError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })?;
        indices.push(idx);
    }

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result
            .with_context(|| format!("Failed to read row {} of {}", row_idx + 1, path.display()))?;
        let view = RowView {
            record: &record,
            indices: &indices,
            headers: &headers,
            row: row_idx + 1,
        };
        if let Some(mapped) = f(&view)? {
            rows.push(mapped);
        }
    }

    Ok(rows)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}
