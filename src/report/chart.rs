//! Bar chart rendering.
//!
//! This module draws one bar per phylum, sized by its total species
//! count, into a PNG image. An empty summary list still produces an
//! image with axes so a run always yields both artifacts.

use crate::config::ChartConfig;
use crate::error::{PipelineError, Result};
use crate::models::PhylumSummary;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Sky-blue bar fill.
const BAR_FILL: RGBColor = RGBColor(135, 206, 235);

/// Renders the per-phylum bar chart to `path`, creating parent
/// directories as needed.
///
/// Bars follow the order of `summaries`; the x axis shows one phylum
/// name under each bar.
pub fn render_bar_chart(
    summaries: &[PhylumSummary],
    path: &Path,
    config: &ChartConfig,
) -> Result<()> {
    super::ensure_parent_dir(path)?;

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_error(path, e))?;

    let tallest = summaries
        .iter()
        .map(|summary| summary.total_species_count)
        .fold(0.0_f64, f64::max);
    // Keep a visible y range even when every bar is zero height.
    let y_max = if tallest > 0.0 { tallest * 1.1 } else { 1.0 };
    let segments = summaries.len().max(1);
    let labels: Vec<&str> = summaries.iter().map(|s| s.phylum.as_str()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.caption, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..segments).into_segmented(), 0f64..y_max)
        .map_err(|e| chart_error(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Phylum")
        .y_desc("Total Species Count")
        .x_labels(segments)
        .x_label_formatter(&|position| match position {
            SegmentValue::CenterOf(index) if *index < labels.len() => labels[*index].to_string(),
            _ => String::new(),
        })
        .draw()
        .map_err(|e| chart_error(path, e))?;

    chart
        .draw_series(summaries.iter().enumerate().map(|(index, summary)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(index), 0.0),
                    (SegmentValue::Exact(index + 1), summary.total_species_count),
                ],
                BAR_FILL.filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))
        .map_err(|e| chart_error(path, e))?;

    root.present().map_err(|e| chart_error(path, e))?;

    info!("Bar chart saved to {}", path.display());
    Ok(())
}

/// Flattens plotters' backend-generic errors into one message.
fn chart_error(path: &Path, error: impl std::fmt::Display) -> PipelineError {
    PipelineError::RenderChart {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_renders_png_with_bars() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("phylum_species_count.png");
        let summaries = vec![
            PhylumSummary::new("Firmicutes", 200.0, 100.0),
            PhylumSummary::new("Proteobacteria", 200.0, 200.0),
        ];

        render_bar_chart(&summaries, &path, &ChartConfig::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_renders_empty_chart_without_bars() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");

        render_bar_chart(&[], &path, &ChartConfig::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("charts").join("out.png");
        let summaries = vec![PhylumSummary::new("Chordata", 5.0, 5.0)];

        render_bar_chart(&summaries, &path, &ChartConfig::default()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_respects_configured_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.png");
        let config = ChartConfig {
            width: 320,
            height: 200,
            ..ChartConfig::default()
        };
        let summaries = vec![PhylumSummary::new("Chordata", 5.0, 5.0)];

        render_bar_chart(&summaries, &path, &config).unwrap();

        // IHDR width/height live at fixed offsets in the PNG header
        let bytes = std::fs::read(&path).unwrap();
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        assert_eq!(width, 320);
        assert_eq!(height, 200);
    }
}
