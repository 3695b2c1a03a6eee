//! Data models for the reporting pipeline.
//!
//! This module contains the core data structures passed between the
//! loading, aggregation, and report generation stages.

/// A single validated row from the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Species identifier (non-empty after trimming).
    pub species: String,
    /// Phylum the species belongs to (non-empty, matched case-sensitively).
    pub phylum: String,
    /// Observed count for the species; finite and non-negative.
    pub count: f64,
}

/// Aggregated statistics for one phylum.
#[derive(Debug, Clone, PartialEq)]
pub struct PhylumSummary {
    /// The phylum this summary describes (unique within a run's output).
    pub phylum: String,
    /// Sum of counts over every record in the group.
    pub total_species_count: f64,
    /// Arithmetic mean of counts over the group, at full precision.
    pub average_species_count: f64,
}

impl PhylumSummary {
    /// Creates a summary from its parts.
    #[allow(dead_code)] // Builder utility
    pub fn new(phylum: impl Into<String>, total: f64, average: f64) -> Self {
        Self {
            phylum: phylum.into(),
            total_species_count: total,
            average_species_count: average,
        }
    }
}
