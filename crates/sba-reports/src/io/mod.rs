//! IO utilities for loading the CSV source tables.

pub mod table;

pub use table::{read_projected, RowView};
