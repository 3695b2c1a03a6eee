//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.taxostat.toml` files and resolving the final file locations
//! used by a run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file probed in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".taxostat.toml";

/// Default summary file name when no explicit path is configured.
pub const DEFAULT_SUMMARY_FILE: &str = "phylum_summary.csv";

/// Default chart file name when no explicit path is configured.
pub const DEFAULT_CHART_FILE: &str = "phylum_species_count.png";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Chart rendering settings.
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Input CSV of per-species counts.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Summary CSV destination; unset means next to the input file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PathBuf>,

    /// Chart image destination; unset means next to the input file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            summary: None,
            chart: None,
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("taxonomic_data.csv")
}

/// Chart rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Caption drawn above the plot area.
    #[serde(default = "default_caption")]
    pub caption: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            caption: default_caption(),
        }
    }
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    600
}

fn default_caption() -> String {
    "Total Species Count by Phylum".to_string()
}

/// Fully resolved file locations for one run.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    /// Input CSV of per-species counts.
    pub input: PathBuf,
    /// Output summary CSV.
    pub summary: PathBuf,
    /// Output chart image.
    pub chart: PathBuf,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.paths.input = input.clone();
        }
        if let Some(ref output) = args.output {
            self.paths.summary = Some(output.clone());
        }
        if let Some(ref plot) = args.plot {
            self.paths.chart = Some(plot.clone());
        }
    }

    /// Resolve the final file locations for this run.
    ///
    /// Output paths that were not set explicitly land in the input file's
    /// directory under their default names.
    pub fn resolve_paths(&self) -> ReportPaths {
        let input = self.paths.input.clone();
        let summary = self
            .paths
            .summary
            .clone()
            .unwrap_or_else(|| sibling(&input, DEFAULT_SUMMARY_FILE));
        let chart = self
            .paths
            .chart
            .clone()
            .unwrap_or_else(|| sibling(&input, DEFAULT_CHART_FILE));

        ReportPaths {
            input,
            summary,
            chart,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

/// Places `file_name` in the same directory as `input`.
fn sibling(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
