//! Error types for the reporting pipeline.
//!
//! Failures fall into two classes the process exit code distinguishes:
//! data-format problems on the input side and write failures on the
//! output side. No failure is recoverable; the first error aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the load, aggregate, and report stages.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input CSV file does not exist.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The header row lacks one or more required column names.
    #[error("{}: missing required column(s): {}", .path.display(), .missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    /// A data row failed validation; `row` is the 1-based line number.
    #[error("{}: row {row}: {reason}", .path.display())]
    InvalidRow {
        path: PathBuf,
        row: u64,
        reason: String,
    },

    /// The input file could not be read or parsed as CSV.
    #[error("failed to read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// An output directory could not be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The summary CSV could not be written.
    #[error("failed to write summary {}: {source}", .path.display())]
    WriteSummary {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The chart image could not be rendered or saved.
    #[error("failed to render chart {}: {message}", .path.display())]
    RenderChart { path: PathBuf, message: String },
}

impl PipelineError {
    /// Returns `true` when the failure is on the input side (the data did
    /// not match the expected format) rather than the output side.
    pub fn is_data_format(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingInput(_)
                | PipelineError::MissingColumns { .. }
                | PipelineError::InvalidRow { .. }
                | PipelineError::ReadInput { .. }
        )
    }

    /// Process exit code for this failure: 1 for data-format problems,
    /// 2 for output problems.
    pub fn exit_code(&self) -> i32 {
        if self.is_data_format() {
            1
        } else {
            2
        }
    }
}

/// Convenience result type used throughout the pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;
