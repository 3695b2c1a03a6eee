//! Analysis modules.
//!
//! Aggregation of validated records into per-phylum summary statistics.

pub mod aggregator;

pub use aggregator::*;
