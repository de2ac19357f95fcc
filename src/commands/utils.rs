use crate::aggregator::calculate_ban_distribution;
use crate::output::read_report;
use crate::utils::config::{BAN_ACTION_MARKER, BAN_VERB_MARKER, SCHEMA_VERSION};
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path).context("Failed to read report")?;

    if report.total_bans != report.counts.total() {
        anyhow::bail!(
            "total_bans is {} but counts sum to {}",
            report.total_bans,
            report.counts.total()
        );
    }
    if report.unique_ips != report.counts.len() {
        anyhow::bail!(
            "unique_ips is {} but counts hold {} addresses",
            report.unique_ips,
            report.counts.len()
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Total Bans: {}", report.total_bans);
    println!("  Unique IPs: {}", report.unique_ips);
    println!("  Graph: {}", if report.graph_url.is_empty() { "(none)" } else { report.graph_url.as_str() });
    println!("  {}", calculate_ban_distribution(&report.counts).summary());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Fail2Ban Analyzer Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string      - Schema version (e.g., '1.0.0')");
        println!("  source: string       - Name of the analyzed log file");
        println!("  counts: object       - Ban count per IP address, first-seen order");
        println!("  graph_url: string    - Chart reference (empty when no bans)");
        println!("  total_bans: number   - Sum of all counts");
        println!("  unique_ips: number   - Number of distinct addresses");
        println!("  generated_at: string - ISO 8601 timestamp");
        println!();
        println!(
            "A line counts as a ban when it contains both '{}' and '{}'.",
            BAN_ACTION_MARKER, BAN_VERB_MARKER
        );
        println!("The banned address is the last whitespace-separated token of the line.");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Fail2Ban Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Counts banned IPs in fail2ban logs and charts ban frequency per address.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::FrequencyTable;
    use crate::output::write_report;
    use crate::parser::AnalysisReport;

    #[test]
    fn test_validate_report_file_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("report.json");
        let mut counts = FrequencyTable::new();
        counts.record("10.0.0.1");
        write_report(&AnalysisReport::new("fail2ban.log", counts, ""), &path).unwrap();

        assert!(validate_report_file(&path).is_ok());
    }

    #[test]
    fn test_validate_report_file_inconsistent_totals() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("report.json");
        let mut report = AnalysisReport::new("fail2ban.log", FrequencyTable::new(), "");
        report.total_bans = 7;
        write_report(&report, &path).unwrap();

        assert!(validate_report_file(&path).is_err());
    }
}
