//! Configuration and constants for the analyzer.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Matching rule for ban events. Both markers are literal, case-sensitive
// substrings and may appear anywhere in the line.
pub const BAN_ACTION_MARKER: &str = "fail2ban.actions";
pub const BAN_VERB_MARKER: &str = "Ban";

/// Largest log file accepted by intake (16 MiB)
pub const DEFAULT_MAX_LOG_BYTES: u64 = 16 * 1024 * 1024;

// Chart artifact defaults
pub const DEFAULT_CHART_DIR: &str = "graphs";
pub const DEFAULT_CHART_FILENAME: &str = "graph.svg";
pub const DEFAULT_GRAPH_URL_PREFIX: &str = "/graphs";

pub const CHART_TITLE: &str = "Failed Login Attempts by IP";
pub const CHART_X_LABEL: &str = "IP Address";
pub const CHART_Y_LABEL: &str = "Failed Login Attempts";
pub const DEFAULT_CHART_WIDTH: usize = 1000;
pub const DEFAULT_CHART_HEIGHT: usize = 600;
pub const BAR_COLOR: &str = "rgb(135, 206, 235)"; // Sky blue

/// Number of offenders shown in text summaries by default
pub const DEFAULT_TOP_OFFENDERS: usize = 10;
