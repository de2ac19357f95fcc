//! Fail2Ban Analyzer
//!
//! Counts banned-IP occurrences in fail2ban logs and renders a bar chart
//! of ban frequency per address.
//!
//! This crate provides the core implementation for the
//! `fail2ban-analyzer` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! fail2ban-analyzer analyze --log /var/log/fail2ban.log --summary
//! ```
//!
//! As a library:
//!
//! ```ignore
//! use fail2ban_analyzer::aggregator::aggregate_file;
//!
//! let counts = aggregate_file("/var/log/fail2ban.log")?;
//! for (ip, bans) in counts.iter() {
//!     println!("{ip}: {bans}");
//! }
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod intake;
pub mod output;
pub mod parser;
pub mod utils;
