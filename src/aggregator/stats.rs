//! Calculate ban metrics and top offenders from a frequency table.
//!
//! Top offenders are the addresses banned most often. These are the
//! primary candidates for permanent blocking.

use super::frequency::FrequencyTable;
use log::debug;

/// An address together with its share of all bans
///
/// **Public** - returned from top_offenders
#[derive(Debug, Clone, PartialEq)]
pub struct Offender {
    pub ip_address: String,
    pub count: u64,

    /// Percentage of total bans
    pub percentage: f64,
}

/// Rank addresses by ban count
///
/// **Public** - main entry point for offender analysis
///
/// # Arguments
/// * `table` - Aggregated ban counts
/// * `top_n` - Number of offenders to return
///
/// # Returns
/// Offenders sorted by count (descending). Ties keep first-seen order.
pub fn top_offenders(table: &FrequencyTable, top_n: usize) -> Vec<Offender> {
    debug!("Ranking top {} offenders from {} addresses", top_n, table.len());

    let total = table.total();
    let mut ranked: Vec<(&str, u64)> = table.iter().collect();

    // Stable sort keeps first-seen order between equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(ip, count)| Offender {
            ip_address: ip.to_string(),
            count,
            percentage: percentage_of(count, total),
        })
        .collect()
}

/// Calculate ban distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_ban_distribution(table: &FrequencyTable) -> BanDistribution {
    if table.is_empty() {
        return BanDistribution::default();
    }

    let total_bans = table.total();
    let unique_ips = table.len();

    BanDistribution {
        total_bans,
        unique_ips,
        max_bans_per_ip: table.max_count(),
        mean_bans_per_ip: total_bans as f64 / unique_ips as f64,
    }
}

fn percentage_of(count: u64, total: u64) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Ban distribution statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BanDistribution {
    /// Total ban events across all addresses
    pub total_bans: u64,

    /// Number of distinct addresses
    pub unique_ips: usize,

    /// Highest ban count for a single address
    pub max_bans_per_ip: u64,

    /// Mean bans per address
    pub mean_bans_per_ip: f64,
}

impl BanDistribution {
    /// Check whether bans come from repeat offenders
    ///
    /// Returns true if addresses were banned more than twice on average
    pub fn is_repeat_heavy(&self) -> bool {
        self.mean_bans_per_ip > 2.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} bans | Addresses: {} | Max: {} | Mean: {:.2}",
            self.total_bans, self.unique_ips, self.max_bans_per_ip, self.mean_bans_per_ip
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.2", "10.0.0.3", "10.0.0.2", "10.0.0.3"] {
            table.record(ip);
        }
        table
    }

    #[test]
    fn test_top_offenders() {
        let offenders = top_offenders(&sample_table(), 2);

        assert_eq!(offenders.len(), 2);
        assert_eq!(offenders[0].ip_address, "10.0.0.2");
        assert_eq!(offenders[0].count, 3);
        assert_eq!(offenders[0].percentage, 50.0);
        assert_eq!(offenders[1].ip_address, "10.0.0.3");
    }

    #[test]
    fn test_top_offenders_ties_keep_first_seen_order() {
        let mut table = FrequencyTable::new();
        table.record("b");
        table.record("a");
        table.record("c");

        let order: Vec<String> = top_offenders(&table, 10)
            .into_iter()
            .map(|o| o.ip_address)
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_calculate_ban_distribution() {
        let dist = calculate_ban_distribution(&sample_table());

        assert_eq!(dist.total_bans, 6);
        assert_eq!(dist.unique_ips, 3);
        assert_eq!(dist.max_bans_per_ip, 3);
        assert_eq!(dist.mean_bans_per_ip, 2.0);
        assert!(!dist.is_repeat_heavy());
    }

    #[test]
    fn test_ban_distribution_empty() {
        let dist = calculate_ban_distribution(&FrequencyTable::new());
        assert_eq!(dist, BanDistribution::default());
        assert!(top_offenders(&FrequencyTable::new(), 5).is_empty());
    }
}
