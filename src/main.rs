//! Taxostat - Per-Phylum Species Count Reporter
//!
//! A CLI tool that reads a CSV table of per-species taxonomic counts,
//! aggregates total and average counts per phylum, writes a summary CSV,
//! and renders a bar chart of the totals.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid input data (missing file, bad header, malformed row)
//!       or CLI/configuration error
//!   2 - An output artifact could not be written

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::Args;
use config::{ChartConfig, Config, ReportPaths};
use models::PhylumSummary;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("taxostat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Load configuration and resolve the run's file locations
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    let paths = config.resolve_paths();
    debug!(
        "Resolved paths: input={}, summary={}, chart={}",
        paths.input.display(),
        paths.summary.display(),
        paths.chart.display()
    );

    // Run the report
    match run_report(&paths, &config.chart, args.dry_run) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Handle --init-config: generate a default .taxostat.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  .taxostat.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .taxostat.toml")?;

    println!("✅ Created .taxostat.toml with default settings.");
    println!("   Edit it to customize paths and chart dimensions.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .taxostat.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Run the complete reporting workflow.
///
/// With `dry_run` set, stops after aggregation and prints the table
/// instead of writing any file.
fn run_report(paths: &ReportPaths, chart_config: &ChartConfig, dry_run: bool) -> error::Result<()> {
    // Step 1: Load and validate the input table
    println!("📥 Loading records from: {}", paths.input.display());
    let records = loader::load_records(&paths.input)?;
    println!("   {} valid records", records.len());

    // Step 2: Aggregate per phylum
    let summaries = analysis::summarize_by_phylum(&records);
    info!(
        "Aggregated {} records into {} phyla",
        records.len(),
        summaries.len()
    );

    // Handle --dry-run: print the table instead of writing files
    if dry_run {
        print_summary_table(&summaries);
        println!("\n✅ Dry run complete. No files were written.");
        return Ok(());
    }

    // Step 3: Write the summary CSV
    println!("📝 Writing summary to: {}", paths.summary.display());
    report::write_summary_csv(&summaries, &paths.summary)?;

    // Step 4: Render the bar chart
    println!("📊 Rendering chart to: {}", paths.chart.display());
    report::render_bar_chart(&summaries, &paths.chart, chart_config)?;

    // Print summary
    println!("\n📊 Report Summary:");
    println!("   Records: {}", records.len());
    println!("   Phyla: {}", summaries.len());
    println!(
        "\n✅ Report complete! Summary: {} | Chart: {}",
        paths.summary.display(),
        paths.chart.display()
    );

    Ok(())
}

/// Print the aggregated table to stdout (dry-run mode).
fn print_summary_table(summaries: &[PhylumSummary]) {
    println!("\n📊 Per-phylum summary ({} phyla):\n", summaries.len());

    if summaries.is_empty() {
        println!("   (no records)");
        return;
    }

    println!("   {:<24} {:>14} {:>14}", "phylum", "total", "average");
    for summary in summaries {
        println!(
            "   {:<24} {:>14} {:>14}",
            summary.phylum,
            report::format_total(summary.total_species_count),
            report::format_average(summary.average_species_count),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const SAMPLE: &str = "species,phylum,count\n\
         Bacillus subtilis,Firmicutes,120\n\
         Clostridium difficile,Firmicutes,80\n\
         Escherichia coli,Proteobacteria,200\n";

    fn paths_in(dir: &Path) -> ReportPaths {
        ReportPaths {
            input: dir.join("taxonomic_data.csv"),
            summary: dir.join("phylum_summary.csv"),
            chart: dir.join("phylum_species_count.png"),
        }
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.input, SAMPLE).unwrap();

        run_report(&paths, &ChartConfig::default(), false).unwrap();

        let summary = fs::read_to_string(&paths.summary).unwrap();
        assert_eq!(
            summary,
            "phylum,total_species_count,average_species_count\n\
             Firmicutes,200,100.0\n\
             Proteobacteria,200,200.0\n"
        );
        assert!(paths.chart.exists());
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.input, SAMPLE).unwrap();

        run_report(&paths, &ChartConfig::default(), false).unwrap();
        let first = fs::read(&paths.summary).unwrap();

        run_report(&paths, &ChartConfig::default(), false).unwrap();
        let second = fs::read(&paths.summary).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_produces_header_only_summary() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.input, "species,phylum,count\n").unwrap();

        run_report(&paths, &ChartConfig::default(), false).unwrap();

        let summary = fs::read_to_string(&paths.summary).unwrap();
        assert_eq!(summary, "phylum,total_species_count,average_species_count\n");
        assert!(paths.chart.exists());
    }

    #[test]
    fn test_invalid_row_aborts_without_outputs() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(
            &paths.input,
            "species,phylum,count\nBacillus subtilis,Firmicutes,abc\n",
        )
        .unwrap();

        let err = run_report(&paths, &ChartConfig::default(), false).unwrap_err();

        assert!(err.is_data_format());
        assert!(!paths.summary.exists());
        assert!(!paths.chart.exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.input, SAMPLE).unwrap();

        run_report(&paths, &ChartConfig::default(), true).unwrap();

        assert!(!paths.summary.exists());
        assert!(!paths.chart.exists());
    }
}
