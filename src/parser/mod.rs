//! Ban line parsing and report schema definitions.
//!
//! This module handles:
//! - Recognizing fail2ban ban-action lines
//! - Extracting the banned address from a qualifying line
//! - Defining the JSON report schema

pub mod ban_line;
pub mod schema;

// Re-export main types
pub use ban_line::{extract_ip, is_ban_event, parse_ban_event, BanEvent};
pub use schema::AnalysisReport;
