//! Input loading and validation.
//!
//! Reads the input CSV into typed records, validating every row up front.
//! A malformed row aborts the load instead of being dropped, so the
//! aggregation stage only ever sees clean data.

use crate::error::{PipelineError, Result};
use crate::models::Record;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndexes {
    species: usize,
    phylum: usize,
    count: usize,
}

/// Loads and validates all records from the CSV file at `path`.
///
/// Surrounding whitespace is trimmed from headers and fields before
/// validation. Returns an empty vector for a header-only file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    if !path.exists() {
        return Err(PipelineError::MissingInput(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|source| read_error(path, source))?;

    let headers = reader
        .headers()
        .map_err(|source| read_error(path, source))?
        .clone();
    let columns = resolve_columns(&headers, path)?;
    debug!(
        "Header resolved: species={}, phylum={}, count={}",
        columns.species, columns.phylum, columns.count
    );

    let records = collect_records(&mut reader, &columns, path)?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Finds the positions of the required columns in the header row.
///
/// Extra columns are tolerated; matching is exact and case-sensitive.
fn resolve_columns(headers: &StringRecord, path: &Path) -> Result<ColumnIndexes> {
    let position = |name: &str| headers.iter().position(|field| field == name);

    match (position("species"), position("phylum"), position("count")) {
        (Some(species), Some(phylum), Some(count)) => Ok(ColumnIndexes {
            species,
            phylum,
            count,
        }),
        (species, phylum, count) => {
            let missing = [("species", species), ("phylum", phylum), ("count", count)]
                .into_iter()
                .filter(|(_, found)| found.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            Err(PipelineError::MissingColumns {
                path: path.to_path_buf(),
                missing,
            })
        }
    }
}

/// Reads every data row, validating as it goes.
fn collect_records<R: Read>(
    reader: &mut csv::Reader<R>,
    columns: &ColumnIndexes,
    path: &Path,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result.map_err(|source| read_error(path, source))?;
        // 1-based line of the row's first byte; header-only files never get here.
        let line = row.position().map_or(0, |position| position.line());
        records.push(parse_row(&row, columns, path, line)?);
    }

    Ok(records)
}

/// Validates one data row and converts it into a [`Record`].
fn parse_row(row: &StringRecord, columns: &ColumnIndexes, path: &Path, line: u64) -> Result<Record> {
    let invalid = |reason: String| PipelineError::InvalidRow {
        path: path.to_path_buf(),
        row: line,
        reason,
    };

    // The reader rejects ragged rows, so the resolved indexes are in range.
    let species = row.get(columns.species).unwrap_or_default();
    let phylum = row.get(columns.phylum).unwrap_or_default();
    let raw_count = row.get(columns.count).unwrap_or_default();

    if species.is_empty() {
        return Err(invalid("species must not be empty".to_string()));
    }
    if phylum.is_empty() {
        return Err(invalid("phylum must not be empty".to_string()));
    }

    let count: f64 = raw_count
        .parse()
        .map_err(|_| invalid(format!("count {raw_count:?} is not a number")))?;
    if !count.is_finite() {
        return Err(invalid(format!("count {raw_count:?} is not finite")));
    }
    if count < 0.0 {
        return Err(invalid(format!("count {count} is negative")));
    }

    Ok(Record {
        species: species.to_string(),
        phylum: phylum.to_string(),
        count,
    })
}

fn read_error(path: &Path, source: csv::Error) -> PipelineError {
    PipelineError::ReadInput {
        path: path.to_path_buf(),
        source,
    }
}
