//! Aggregation of ban events into per-address counts and metrics.
//!
//! This module transforms a raw log stream into:
//! - An insertion-ordered frequency table (address -> ban count)
//! - Top offender analysis
//! - Ban distribution statistics

pub mod frequency;
pub mod log_aggregator;
pub mod stats;

// Re-export main types and functions
pub use frequency::FrequencyTable;
pub use log_aggregator::{aggregate, aggregate_file};
pub use stats::{calculate_ban_distribution, top_offenders, BanDistribution, Offender};
