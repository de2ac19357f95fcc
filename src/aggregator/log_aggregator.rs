//! Single-pass aggregation of a fail2ban log into a frequency table.
//!
//! The input is read once, line by line, to completion. Bytes are decoded
//! lossily so a stray invalid UTF-8 sequence never aborts the pass. Any I/O
//! error fails the whole call and no partial table is returned.

use super::frequency::FrequencyTable;
use crate::parser::parse_ban_event;
use crate::utils::error::AggregateError;
use log::{debug, info, trace};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Count ban events per address in a log stream
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `source` - Buffered reader over the log contents
///
/// # Returns
/// Frequency table in first-seen order (empty if no line qualified)
///
/// # Errors
/// * `AggregateError::InputUnavailable` - the stream could not be read to completion
///
/// # Example
/// ```ignore
/// let table = aggregate(BufReader::new(File::open("fail2ban.log")?))?;
/// ```
pub fn aggregate<R: BufRead>(mut source: R) -> Result<FrequencyTable, AggregateError> {
    let mut table = FrequencyTable::new();
    let mut buf = Vec::new();
    let mut lines_read: u64 = 0;
    let mut ban_lines: u64 = 0;

    loop {
        buf.clear();
        if source.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // A bare '\r' also ends a line; in "\r\n" the trailing "\n" piece is empty
        for segment in split_carriage_returns(&buf) {
            lines_read += 1;

            let line = String::from_utf8_lossy(segment);
            if let Some(event) = parse_ban_event(&line) {
                let count = table.record(event.ip_address);
                ban_lines += 1;
                trace!("Line {}: ban of {} (seen {} times)", lines_read, event.ip_address, count);
            }
        }
    }

    debug!(
        "Scanned {} lines, {} ban events, {} distinct addresses",
        lines_read,
        ban_lines,
        table.len()
    );

    Ok(table)
}

/// Split a '\n'-terminated chunk at every '\r', dropping the empty tail of "\r\n"
fn split_carriage_returns(chunk: &[u8]) -> impl Iterator<Item = &[u8]> {
    chunk
        .split(|&b| b == b'\r')
        .filter(|segment| !segment.is_empty() && *segment != b"\n")
}

/// Aggregate a log file on disk
///
/// **Public** - convenience wrapper around `aggregate`
///
/// # Errors
/// * `AggregateError::InputUnavailable` - file cannot be opened or read
pub fn aggregate_file(path: impl AsRef<Path>) -> Result<FrequencyTable, AggregateError> {
    let path = path.as_ref();

    info!("Aggregating ban events from: {}", path.display());

    let file = File::open(path)?;
    aggregate(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{self, Cursor, Read};

    const SCENARIO_A: &str = "\
2024-01-01 10:00:00 fail2ban.actions [1234]: NOTICE [sshd] Ban 192.168.1.10
2024-01-01 10:05:00 fail2ban.actions [1234]: NOTICE [sshd] Ban 192.168.1.10
2024-01-01 10:10:00 fail2ban.actions [1234]: NOTICE [sshd] Ban 10.0.0.5
2024-01-01 10:15:00 fail2ban.actions [1234]: NOTICE [sshd] Unban 10.0.0.5
";

    /// Reader that yields some bytes and then fails
    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::Other, "disk gone"));
            }
            self.served = true;
            let line = b"fail2ban.actions [1]: NOTICE [sshd] Ban 10.0.0.1\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn test_scenario_unban_counts_as_ban() {
        let table = aggregate(Cursor::new(SCENARIO_A)).unwrap();

        let entries: Vec<(&str, u64)> = table.iter().collect();
        assert_eq!(entries, vec![("192.168.1.10", 2), ("10.0.0.5", 2)]);
    }

    #[test]
    fn test_empty_input() {
        let table = aggregate(Cursor::new("")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_no_qualifying_lines() {
        let log = "\
2024-01-01 10:00:00 fail2ban.filter [1234]: INFO [sshd] Found 192.168.1.10

2024-01-01 10:00:01 sshd[42]: Failed password for root
";
        let table = aggregate(Cursor::new(log)).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_last_line_without_newline() {
        let log = "fail2ban.actions: Ban 10.0.0.1\nfail2ban.actions: Ban 10.0.0.2";
        let table = aggregate(Cursor::new(log)).unwrap();
        assert_eq!(table.get("10.0.0.2"), Some(1));
        assert_eq!(table.total(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let log = "fail2ban.actions: Ban 10.0.0.1\r\nfail2ban.actions: Ban 10.0.0.1\r\n";
        let table = aggregate(Cursor::new(log)).unwrap();
        assert_eq!(table.get("10.0.0.1"), Some(2));
    }

    #[test]
    fn test_bare_cr_line_endings() {
        let log = "x fail2ban.actions NOTICE [sshd] Ban 10.0.0.1\rx fail2ban.actions NOTICE [sshd] Ban 10.0.0.2\r";
        let table = aggregate(Cursor::new(log)).unwrap();

        let entries: Vec<(&str, u64)> = table.iter().collect();
        assert_eq!(entries, vec![("10.0.0.1", 1), ("10.0.0.2", 1)]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let log = "fail2ban.actions: Ban 10.0.0.1\rfail2ban.actions: Ban 10.0.0.2\r\nfail2ban.actions: Ban 10.0.0.3\n";
        let table = aggregate(Cursor::new(log)).unwrap();
        assert_eq!(table.total(), 3);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_split_carriage_returns() {
        let segments: Vec<&[u8]> = split_carriage_returns(b"a\rb\r\n").collect();
        assert_eq!(segments, vec![&b"a"[..], &b"b"[..]]);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut log = b"fail2ban.actions [\xff\xfe]: Ban 10.0.0.9\n".to_vec();
        log.extend_from_slice(b"\xc3\x28 garbage\n");

        let table = aggregate(Cursor::new(log)).unwrap();
        assert_eq!(table.get("10.0.0.9"), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_read_failure_is_input_unavailable() {
        let reader = BufReader::new(FailingReader { served: false });
        let result = aggregate(reader);
        assert!(matches!(result, Err(AggregateError::InputUnavailable(_))));
    }

    #[test]
    fn test_aggregate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = aggregate_file(dir.path().join("missing.log"));
        assert!(matches!(result, Err(AggregateError::InputUnavailable(_))));
    }
}
