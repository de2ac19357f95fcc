//! Output JSON schema definitions for analysis reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::FrequencyTable;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Name of the analyzed log file
    pub source: String,

    /// Ban count per address, in first-seen order
    pub counts: FrequencyTable,

    /// Reference to the rendered chart (empty when nothing was rendered)
    pub graph_url: String,

    /// Total number of ban events
    pub total_bans: u64,

    /// Number of distinct addresses
    pub unique_ips: usize,

    /// Timestamp when report was generated
    pub generated_at: String,
}

impl AnalysisReport {
    /// Build a report for a finished aggregation
    pub fn new(source: impl Into<String>, counts: FrequencyTable, graph_url: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            total_bans: counts.total(),
            unique_ips: counts.len(),
            counts,
            graph_url: graph_url.into(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals_follow_counts() {
        let mut counts = FrequencyTable::new();
        counts.record("10.0.0.1");
        counts.record("10.0.0.1");
        counts.record("10.0.0.2");

        let report = AnalysisReport::new("fail2ban.log", counts, "/graphs/graph.svg");

        assert_eq!(report.version, SCHEMA_VERSION);
        assert_eq!(report.total_bans, 3);
        assert_eq!(report.unique_ips, 2);
        assert_eq!(report.graph_url, "/graphs/graph.svg");
    }

    #[test]
    fn test_report_json_keeps_original_fields() {
        let report = AnalysisReport::new("empty.log", FrequencyTable::new(), "");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["counts"], serde_json::json!({}));
        assert_eq!(json["graph_url"], "");
    }
}
