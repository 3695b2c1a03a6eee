//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Taxostat - per-phylum statistics from taxonomic count tables
///
/// Reads a CSV of per-species counts, aggregates total and average
/// counts per phylum, writes a summary CSV, and renders a bar chart
/// of the totals.
///
/// Examples:
///   taxostat
///   taxostat -i data/taxonomic_data.csv
///   taxostat -i counts.csv -o summary.csv -p chart.png
///   taxostat --dry-run
///   taxostat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    ///
    /// Must contain `species`, `phylum` and `count` columns (any order).
    /// Can also be set via TAXOSTAT_INPUT env var or .taxostat.toml
    /// config. Defaults to taxonomic_data.csv in the working directory.
    #[arg(short, long, value_name = "FILE", env = "TAXOSTAT_INPUT")]
    pub input: Option<PathBuf>,

    /// Output path for the summary CSV
    ///
    /// Defaults to phylum_summary.csv next to the input file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output path for the bar chart image
    ///
    /// Defaults to phylum_species_count.png next to the input file.
    #[arg(short, long, value_name = "FILE")]
    pub plot: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .taxostat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and aggregate, print the table, write no files
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .taxostat.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if input.as_os_str().is_empty() {
                return Err("Input path must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
