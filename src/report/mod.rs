//! Report generation.
//!
//! Produces the two output artifacts of a run: the summary CSV and the
//! bar chart image.

pub mod chart;
pub mod generator;

pub use chart::render_bar_chart;
pub use generator::{format_average, format_total, write_summary_csv};

use crate::error::{PipelineError, Result};
use std::path::Path;

/// Creates an output path's parent directory when it does not exist yet.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| PipelineError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
