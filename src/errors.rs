//! Error taxonomy for ticketlens runs.
//!
//! Every variant aborts the pipeline before any output is written; the
//! `Display` text is the single user-visible diagnostic line, so each
//! failure kind must be distinguishable from it alone.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TicketlensError {
    /// The input source does not exist. Checked before any processing.
    #[error("input not found: {0}")]
    InputNotFound(PathBuf),

    /// The input is missing one or more required columns.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A date cell failed to parse. Fail fast; no sentinel substitution.
    #[error("invalid date in column '{column}' at data row {row}: '{value}'")]
    InvalidDate {
        column: String,
        row: usize,
        value: String,
    },

    /// An interaction count cell was not a non-negative integer.
    #[error("invalid interaction count at data row {row}: '{value}'")]
    InvalidCount { row: usize, value: String },

    /// The input extension maps to no known tabular format.
    #[error("unsupported input format: '{0}' (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat(String),
}
