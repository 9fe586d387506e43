//! Single-pass parse-and-classify over input lines
//!
//! Each line is parsed and, if valid, classified before the next one is read,
//! so counters and the recent-errors ring always see records in file order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::aggregate::Aggregator;
use crate::error::AnalysisError;
use crate::parser::parse_line;

/// Line bookkeeping for one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub lines_read: u64,
    pub parsed: u64,
    /// Malformed lines that were skipped
    pub skipped: u64,
}

impl PassStats {
    fn record_line(&mut self, line_number: u64, line: &str, aggregator: &mut Aggregator) {
        self.lines_read += 1;
        match parse_line(line) {
            Ok(record) => {
                self.parsed += 1;
                aggregator.classify(record);
            }
            Err(e) => {
                self.skipped += 1;
                tracing::warn!(line_number, "Skipping malformed line ({}): {}", e, line);
            }
        }
    }
}

/// Parse and classify every line, in order
///
/// Malformed lines are skipped with a diagnostic and never touch the counters.
pub fn analyze_lines<I, S>(lines: I, aggregator: &mut Aggregator) -> PassStats
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stats = PassStats::default();
    for (idx, line) in lines.into_iter().enumerate() {
        stats.record_line(idx as u64 + 1, line.as_ref(), aggregator);
    }
    stats
}

/// Analyze lines from a buffered reader
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD and the line is
/// still analyzed. An I/O failure aborts the pass; counters may already hold
/// the lines seen before it, so callers should discard the aggregator on error.
pub fn analyze_reader<R: BufRead>(
    mut reader: R,
    source: &Path,
    aggregator: &mut Aggregator,
) -> Result<PassStats, AnalysisError> {
    let mut stats = PassStats::default();
    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| AnalysisError::file_access(source, e))?;
        if read == 0 {
            break;
        }
        line_number += 1;
        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        stats.record_line(line_number, &line, aggregator);
    }
    Ok(stats)
}

/// Drop a trailing `\n` or `\r\n`
fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

/// Open `path` and analyze it line by line
pub fn analyze_file(
    path: &Path,
    aggregator: &mut Aggregator,
) -> Result<PassStats, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::file_access(path, e))?;
    tracing::debug!("Analyzing {}", path.display());

    let stats = analyze_reader(BufReader::new(file), path, aggregator)?;

    tracing::debug!(
        "Finished {}: {} lines, {} parsed, {} skipped",
        path.display(),
        stats.lines_read,
        stats.parsed,
        stats.skipped
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::LevelCounts;
    use crate::error::AccessErrorKind;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
[2024-08-23 14:35:21] INFO User123 logged in
[2024-08-23 14:35:22] WARN Memory usage at 85%
[2024-08-23 14:35:23] ERROR Disk failure on node3
";

    #[test]
    fn test_end_to_end_sample() {
        let mut agg = Aggregator::default();
        let stats = analyze_lines(SAMPLE.lines(), &mut agg);

        assert_eq!(stats.parsed, 3);
        assert_eq!(stats.skipped, 0);

        let counts = agg.counts();
        assert_eq!(counts.info, 1);
        assert_eq!(counts.warn, 1);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.memory_warnings, 1);

        let held: Vec<String> = agg.recent_errors().iter().map(|r| r.to_string()).collect();
        assert_eq!(held, vec!["[2024-08-23 14:35:23] ERROR Disk failure on node3"]);
    }

    #[test]
    fn test_malformed_line_changes_nothing() {
        let mut agg = Aggregator::default();
        let stats = analyze_lines(["garbage no brackets"], &mut agg);

        assert_eq!(stats.lines_read, 1);
        assert_eq!(stats.parsed, 0);
        assert_eq!(stats.skipped, 1);
        assert_eq!(agg.counts(), LevelCounts::default());
        assert!(agg.recent_errors().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped_between_valid_ones() {
        let lines = [
            "[2024-08-23 14:35:21] INFO started",
            "",
            "no closing bracket here",
            "[2024-08-23 14:35:22] ERROR crashed",
        ];
        let mut agg = Aggregator::default();
        let stats = analyze_lines(lines, &mut agg);

        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.parsed, 2);
        assert_eq!(stats.skipped, 2);
        assert_eq!(agg.counts().info, 1);
        assert_eq!(agg.counts().error, 1);
    }

    #[test]
    fn test_counts_sum_to_parsed_lines() {
        let lines = [
            "[2024-08-23 14:35:21] INFO a",
            "[2024-08-23 14:35:21] TRACE b",
            "[2024-08-23 14:35:21] WARN c",
            "bad",
            "[2024-08-23 14:35:21] ERROR d",
            "[2024-08-23 14:35:21] NOTICE e",
        ];
        let mut agg = Aggregator::default();
        let stats = analyze_lines(lines, &mut agg);

        assert_eq!(agg.counts().total(), stats.parsed);
        assert_eq!(agg.counts().unrecognized, 2);
    }

    #[test]
    fn test_ring_holds_last_hundred_in_arrival_order() {
        let lines: Vec<String> = (0..150)
            .map(|i| format!("[2024-08-23 14:35:21] ERROR failure {}", i))
            .collect();
        let mut agg = Aggregator::default();
        analyze_lines(&lines, &mut agg);

        assert_eq!(agg.counts().error, 150);
        let held: Vec<&str> = agg.recent_errors().iter().map(|r| r.message()).collect();
        let expected: Vec<String> = (50..150).map(|i| format!("failure {}", i)).collect();
        assert_eq!(held, expected);
    }

    #[test]
    fn test_empty_pass_is_a_no_op() {
        let mut agg = Aggregator::default();
        analyze_lines(SAMPLE.lines(), &mut agg);
        let before = agg.counts();

        let stats = analyze_lines(std::iter::empty::<&str>(), &mut agg);

        assert_eq!(stats, PassStats::default());
        assert_eq!(agg.counts(), before);
        assert_eq!(agg.recent_errors().len(), 1);
    }

    #[test]
    fn test_analyze_reader_handles_crlf() {
        let input = "[2024-08-23 14:35:21] INFO hello\r\n[2024-08-23 14:35:22] ERROR bye\r\n";
        let mut agg = Aggregator::default();
        let stats = analyze_reader(Cursor::new(input), Path::new("mem"), &mut agg).unwrap();

        assert_eq!(stats.parsed, 2);
        let held = agg.recent_errors().snapshot();
        assert_eq!(held[0].message(), "bye");
    }

    #[test]
    fn test_analyze_reader_keeps_lines_with_invalid_utf8() {
        let input: &[u8] = b"[2024-08-23 14:35:21] INFO ok\n\
[2024-08-23 14:35:22] WARN Memory caf\xe9 high\n\
[2024-08-23 14:35:23] ERROR Disk failure\n";
        let mut agg = Aggregator::default();
        let stats = analyze_reader(input, Path::new("latin1.log"), &mut agg).unwrap();

        assert_eq!(stats.parsed, 3);
        let counts = agg.counts();
        assert_eq!(counts.info, 1);
        assert_eq!(counts.warn, 1);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.memory_warnings, 1);
        assert_eq!(agg.recent_errors().snapshot()[0].message(), "Disk failure");
    }

    #[test]
    fn test_analyze_reader_last_line_without_newline() {
        let input: &[u8] = b"[2024-08-23 14:35:21] INFO a\n[2024-08-23 14:35:22] ERROR tail";
        let mut agg = Aggregator::default();
        let stats = analyze_reader(input, Path::new("mem"), &mut agg).unwrap();

        assert_eq!(stats.lines_read, 2);
        assert_eq!(agg.recent_errors().snapshot()[0].message(), "tail");
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending(b"abc\r\n"), b"abc");
        assert_eq!(strip_line_ending(b"abc\n"), b"abc");
        assert_eq!(strip_line_ending(b"abc"), b"abc");
        assert_eq!(strip_line_ending(b"a\rb\n"), b"a\rb");
    }

    #[test]
    fn test_analyze_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let mut agg = Aggregator::default();
        let stats = analyze_file(file.path(), &mut agg).unwrap();

        assert_eq!(stats.lines_read, 3);
        assert_eq!(agg.counts().memory_warnings, 1);
    }

    #[test]
    fn test_analyze_missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.log");

        let mut agg = Aggregator::default();
        let err = analyze_file(&path, &mut agg).unwrap_err();

        assert_eq!(err.kind(), AccessErrorKind::NotFound);
        assert_eq!(agg.counts(), LevelCounts::default());
    }
}
