//! Per-phylum aggregation and statistics.
//!
//! This module groups validated records by phylum and computes the
//! summary statistics reported for each group.

use crate::models::{PhylumSummary, Record};
use std::collections::HashMap;

/// Running totals for one phylum group.
#[derive(Debug, Default)]
struct GroupStats {
    total: f64,
    size: usize,
}

impl GroupStats {
    fn add(&mut self, count: f64) {
        self.total += count;
        self.size += 1;
    }
}

/// Group records by phylum and compute each group's total and mean count.
///
/// Grouping uses exact, case-sensitive string equality. The result is
/// sorted ascending by phylum name so repeated runs over the same input
/// produce identical output; empty input yields an empty summary list.
pub fn summarize_by_phylum(records: &[Record]) -> Vec<PhylumSummary> {
    let mut groups: HashMap<&str, GroupStats> = HashMap::new();

    for record in records {
        groups
            .entry(record.phylum.as_str())
            .or_default()
            .add(record.count);
    }

    let mut summaries: Vec<PhylumSummary> = groups
        .into_iter()
        .map(|(phylum, stats)| PhylumSummary {
            phylum: phylum.to_string(),
            total_species_count: stats.total,
            // A group exists only because at least one record fed it.
            average_species_count: stats.total / stats.size as f64,
        })
        .collect();

    summaries.sort_by(|a, b| a.phylum.cmp(&b.phylum));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(species: &str, phylum: &str, count: f64) -> Record {
        Record {
            species: species.to_string(),
            phylum: phylum.to_string(),
            count,
        }
    }

    #[test]
    fn test_totals_and_averages_per_group() {
        let records = vec![
            create_test_record("Bacillus subtilis", "Firmicutes", 120.0),
            create_test_record("Clostridium difficile", "Firmicutes", 80.0),
            create_test_record("Escherichia coli", "Proteobacteria", 200.0),
        ];

        let summaries = summarize_by_phylum(&records);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].phylum, "Firmicutes");
        assert_eq!(summaries[0].total_species_count, 200.0);
        assert_eq!(summaries[0].average_species_count, 100.0);
        assert_eq!(summaries[1].phylum, "Proteobacteria");
        assert_eq!(summaries[1].total_species_count, 200.0);
        assert_eq!(summaries[1].average_species_count, 200.0);
    }

    #[test]
    fn test_covers_every_distinct_phylum() {
        let records = vec![
            create_test_record("A", "Chordata", 5.0),
            create_test_record("B", "Arthropoda", 7.0),
            create_test_record("C", "Mollusca", 9.0),
        ];

        let summaries = summarize_by_phylum(&records);
        let phyla: Vec<&str> = summaries.iter().map(|s| s.phylum.as_str()).collect();

        assert_eq!(phyla, vec!["Arthropoda", "Chordata", "Mollusca"]);
    }

    #[test]
    fn test_empty_input_yields_empty_summary() {
        assert!(summarize_by_phylum(&[]).is_empty());
    }

    #[test]
    fn test_single_record_group() {
        let records = vec![create_test_record("A", "Chordata", 17.0)];

        let summaries = summarize_by_phylum(&records);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_species_count, 17.0);
        assert_eq!(summaries[0].average_species_count, 17.0);
    }

    #[test]
    fn test_grouping_is_case_sensitive() {
        let records = vec![
            create_test_record("A", "Firmicutes", 10.0),
            create_test_record("B", "firmicutes", 20.0),
        ];

        let summaries = summarize_by_phylum(&records);

        assert_eq!(summaries.len(), 2);
        // Uppercase sorts before lowercase in byte order
        assert_eq!(summaries[0].phylum, "Firmicutes");
        assert_eq!(summaries[1].phylum, "firmicutes");
    }

    #[test]
    fn test_fractional_counts_keep_precision() {
        let records = vec![
            create_test_record("A", "Chordata", 1.5),
            create_test_record("B", "Chordata", 2.0),
        ];

        let summaries = summarize_by_phylum(&records);

        assert_eq!(summaries[0].total_species_count, 3.5);
        assert_eq!(summaries[0].average_species_count, 1.75);
    }

    #[test]
    fn test_zero_counts_are_valid() {
        let records = vec![
            create_test_record("A", "Chordata", 0.0),
            create_test_record("B", "Chordata", 0.0),
        ];

        let summaries = summarize_by_phylum(&records);

        assert_eq!(summaries[0].total_species_count, 0.0);
        assert_eq!(summaries[0].average_species_count, 0.0);
    }
}
