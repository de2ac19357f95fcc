//! Matching and extraction rules for fail2ban ban lines.
//!
//! A typical line looks like:
//!
//! ```text
//! 2024-01-01 10:00:00 fail2ban.actions [1234]: NOTICE [sshd] Ban 192.168.1.10
//! ```
//!
//! The rules are purely textual. A line qualifies when it contains both the
//! ban-action subsystem marker and the ban verb, and the banned address is
//! whatever the last whitespace-delimited token happens to be.

use crate::utils::config::{BAN_ACTION_MARKER, BAN_VERB_MARKER};

/// A ban event derived from a single qualifying log line
///
/// **Public** - borrowed view into the line it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanEvent<'a> {
    /// Last token of the line. Not validated as an IP address.
    pub ip_address: &'a str,
}

/// Check whether a line records a ban action
///
/// **Public** - the matching rule
///
/// Both checks are case-sensitive substring tests. Note that `"Unban"`
/// contains `"Ban"`, so unban lines qualify as well.
pub fn is_ban_event(line: &str) -> bool {
    line.contains(BAN_ACTION_MARKER) && line.contains(BAN_VERB_MARKER)
}

/// Extract the banned address from a line
///
/// **Public** - the extraction rule
///
/// Returns the last whitespace-delimited token, or `None` for a line that is
/// empty or all whitespace. The ASCII information separators `\x1c`..`\x1f`
/// count as whitespace too.
pub fn extract_ip(line: &str) -> Option<&str> {
    line.split(is_token_separator)
        .filter(|token| !token.is_empty())
        .next_back()
}

fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Parse a line into a ban event
///
/// **Public** - combines matching and extraction
///
/// # Returns
/// `Some(BanEvent)` for qualifying lines, `None` otherwise
pub fn parse_ban_event(line: &str) -> Option<BanEvent<'_>> {
    if !is_ban_event(line) {
        return None;
    }

    // A qualifying line always holds the markers, so it has at least one token
    extract_ip(line).map(|ip_address| BanEvent { ip_address })
}
