//! Summary CSV generation.
//!
//! This module writes the aggregated per-phylum table as a three-column
//! CSV. The same input always produces byte-identical output.

use crate::error::{PipelineError, Result};
use crate::models::PhylumSummary;
use std::path::Path;
use tracing::info;

/// Header row of the summary CSV.
pub const SUMMARY_HEADER: [&str; 3] = ["phylum", "total_species_count", "average_species_count"];

/// Writes the summary table to `path`, creating parent directories as
/// needed.
///
/// Rows appear in the order given; an empty summary list produces a
/// header-only file.
pub fn write_summary_csv(summaries: &[PhylumSummary], path: &Path) -> Result<()> {
    super::ensure_parent_dir(path)?;

    let mut writer =
        csv::Writer::from_path(path).map_err(|source| write_error(path, source))?;

    writer
        .write_record(SUMMARY_HEADER)
        .map_err(|source| write_error(path, source))?;

    for summary in summaries {
        writer
            .write_record([
                &summary.phylum,
                &format_total(summary.total_species_count),
                &format_average(summary.average_species_count),
            ])
            .map_err(|source| write_error(path, source))?;
    }

    writer
        .flush()
        .map_err(|source| write_error(path, csv::Error::from(source)))?;

    info!(
        "Summary for {} phyla written to {}",
        summaries.len(),
        path.display()
    );
    Ok(())
}

/// Formats a total count: integral values print without a decimal point
/// (`270`), fractional ones keep their exact digits (`200.5`).
pub fn format_total(value: f64) -> String {
    value.to_string()
}

/// Formats an average count: rounds half-to-even to two decimals, then
/// trims one trailing zero so integral values still carry `.0`.
///
/// Yields `90.0`, `33.33`, and `100.5` for the respective inputs.
pub fn format_average(value: f64) -> String {
    let rendered = format!("{value:.2}");
    match rendered.strip_suffix('0') {
        Some(trimmed) => trimmed.to_string(),
        None => rendered,
    }
}

fn write_error(path: &Path, source: csv::Error) -> PipelineError {
    PipelineError::WriteSummary {
        path: path.to_path_buf(),
        source,
    }
}
