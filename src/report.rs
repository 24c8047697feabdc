//! Diagnostic report produced alongside parsed messages.
//!
//! The parser never fails on malformed input. Everything that could not be
//! attributed to a message or a date header is accounted for here:
//!
//! - [`ParseStats`] - line counters and a bounded sample of failed lines
//! - [`ReportIssue`] - advisory conditions (no header, nothing parsed, skipped lines)
//! - [`ParseReport`] - both of the above, created once per parse
//!
//! Callers distinguish an empty-but-valid export from an unparseable one by
//! looking at the message count together with [`ParseReport::errors`].

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::DEFAULT_MAX_FAILED_SAMPLES;

/// Fixed-capacity, append-only collector.
///
/// Once full, further pushes are dropped without being built, so large inputs
/// never accumulate diagnostic text beyond `capacity` entries.
///
/// ```
/// use linestats::report::SampleBuffer;
///
/// let mut buf = SampleBuffer::new(2);
/// assert!(buf.push_with(|| "a".to_string()));
/// assert!(buf.push_with(|| "b".to_string()));
/// assert!(!buf.push_with(|| unreachable!()));
/// assert_eq!(buf.as_slice(), ["a", "b"]);
/// ```
///
/// Serialized as a plain list. Equality compares the retained items only, and
/// a deserialized buffer gets `max(len, DEFAULT_MAX_FAILED_SAMPLES)` capacity.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(transparent)]
pub struct SampleBuffer<T> {
    items: Vec<T>,
    #[serde(skip)]
    capacity: usize,
}

impl<T> SampleBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Appends the value built by `make` if there is room.
    ///
    /// Returns `false` (and does not call `make`) once the buffer is full.
    pub fn push_with(&mut self, make: impl FnOnce() -> T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(make());
        true
    }

    /// Returns `true` when no more items will be accepted.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Maximum number of retained items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the buffer, returning the retained items.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for SampleBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FAILED_SAMPLES)
    }
}

impl<T: PartialEq> PartialEq for SampleBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SampleBuffer<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        let capacity = items.len().max(DEFAULT_MAX_FAILED_SAMPLES);
        Ok(Self { items, capacity })
    }
}

impl<'a, T> IntoIterator for &'a SampleBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Line counters collected during one parse.
///
/// `continuation_lines` and ignored lines (stray text after a date header
/// with no open message) are not part of any other counter, so
/// `empty_lines + date_headers + skipped_lines <= total_lines` holds but the
/// counters do not sum to `total_lines`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Physical lines in the input, including a trailing empty line.
    pub total_lines: usize,
    /// Messages produced. Always equals the length of the message list.
    pub parsed_messages: usize,
    /// Message-shaped lines that failed every form, plus pre-header lines.
    pub skipped_lines: usize,
    /// Recognized date headers.
    pub date_headers: usize,
    /// Blank lines.
    pub empty_lines: usize,
    /// Lines appended to the previous message.
    pub continuation_lines: usize,
    /// Message candidates dropped because date and time did not form a real timestamp.
    pub invalid_timestamps: usize,
    /// Excerpts of skipped lines, capped.
    pub failed_lines: SampleBuffer<String>,
}

/// Advisory condition found after a parse.
///
/// These are never raised; they are collected in [`ParseReport::errors`] for
/// the caller to display.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportIssue {
    /// The export contained no `YYYY/MM/DD` style header.
    #[error("No date header found. Check the file format (expected YYYY/MM/DD or YYYY-MM-DD headers)")]
    NoDateHeader,

    /// Date headers exist but no line became a message.
    #[error("Dates were found but no messages could be parsed; the message format may be incompatible")]
    NoMessagesParsed,

    /// Neither headers nor messages were recognized.
    #[error("No recognizable content. Make sure this is a LINE chat history export")]
    NoRecognizableContent,

    /// Some lines could not be parsed.
    #[error("{count} lines could not be parsed")]
    SkippedLines {
        /// Number of skipped lines
        count: usize,
    },
}

/// Diagnostic record produced once per parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Line counters and failed-line samples.
    pub stats: ParseStats,
    /// Advisory conditions, in the order they were detected.
    pub errors: Vec<ReportIssue>,
}

impl ParseReport {
    /// Derives the advisory issues from the counters.
    ///
    /// Order: missing header, then empty result, then skipped lines.
    pub fn from_stats(stats: ParseStats) -> Self {
        let mut errors = Vec::new();

        if stats.date_headers == 0 {
            errors.push(ReportIssue::NoDateHeader);
        }

        if stats.parsed_messages == 0 {
            if stats.date_headers > 0 {
                errors.push(ReportIssue::NoMessagesParsed);
            } else {
                errors.push(ReportIssue::NoRecognizableContent);
            }
        }

        if stats.skipped_lines > 0 {
            errors.push(ReportIssue::SkippedLines {
                count: stats.skipped_lines,
            });
        }

        Self { stats, errors }
    }

    /// Returns the advisory issues rendered as display strings.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Returns `true` if any advisory issue was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if the export was not recognized at all.
    pub fn is_unrecognized(&self) -> bool {
        self.stats.parsed_messages == 0 && self.has_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_buffer_caps() {
        let mut buf = SampleBuffer::new(3);
        for i in 0..10 {
            buf.push_with(|| i);
        }
        assert_eq!(buf.len(), 3);
        assert!(buf.is_full());
        assert_eq!(buf.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_sample_buffer_zero_capacity() {
        let mut buf: SampleBuffer<String> = SampleBuffer::new(0);
        assert!(!buf.push_with(|| panic!("must not be built")));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_sample_buffer_serializes_as_list() {
        let mut buf = SampleBuffer::new(5);
        buf.push_with(|| "line 1: 13:30".to_string());
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, r#"["line 1: 13:30"]"#);
    }

    #[test]
    fn test_sample_buffer_deserialize_restores_capacity() {
        let buf: SampleBuffer<String> = serde_json::from_str(r#"["line 1: noise"]"#).unwrap();
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.capacity(), DEFAULT_MAX_FAILED_SAMPLES);
        assert!(!buf.is_full());

        let many: Vec<String> = (0..30).map(|i| format!("line {i}")).collect();
        let json = serde_json::to_string(&many).unwrap();
        let big: SampleBuffer<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(big.capacity(), 30);
        assert!(big.is_full());
    }

    #[test]
    fn test_sample_buffer_equality_ignores_capacity() {
        let mut a = SampleBuffer::new(2);
        let mut b = SampleBuffer::new(50);
        a.push_with(|| "x");
        b.push_with(|| "x");
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_result_json_round_trip() {
        let result = crate::parser::parse_line_chat("noise\n2024/05/20\n13:30\tAlice\tHi\n");
        assert_eq!(result.report.stats.failed_lines.len(), 1);

        let json = serde_json::to_string(&result).unwrap();
        let back: crate::parser::ParseResult = serde_json::from_str(&json).unwrap();

        assert_eq!(back, result);
        assert_eq!(
            back.report.stats.failed_lines.capacity(),
            DEFAULT_MAX_FAILED_SAMPLES
        );
    }

    #[test]
    fn test_report_no_header() {
        let report = ParseReport::from_stats(ParseStats::default());
        assert_eq!(
            report.errors,
            vec![ReportIssue::NoDateHeader, ReportIssue::NoRecognizableContent]
        );
        assert!(report.is_unrecognized());
    }

    #[test]
    fn test_report_dates_without_messages() {
        let stats = ParseStats {
            date_headers: 2,
            ..ParseStats::default()
        };
        let report = ParseReport::from_stats(stats);
        assert_eq!(report.errors, vec![ReportIssue::NoMessagesParsed]);
    }

    #[test]
    fn test_report_skipped_lines_message() {
        let stats = ParseStats {
            date_headers: 1,
            parsed_messages: 4,
            skipped_lines: 3,
            ..ParseStats::default()
        };
        let report = ParseReport::from_stats(stats);
        assert_eq!(report.errors, vec![ReportIssue::SkippedLines { count: 3 }]);
        assert_eq!(report.error_messages(), vec!["3 lines could not be parsed"]);
        assert!(!report.is_unrecognized());
    }

    #[test]
    fn test_report_clean() {
        let stats = ParseStats {
            date_headers: 1,
            parsed_messages: 1,
            ..ParseStats::default()
        };
        assert!(!ParseReport::from_stats(stats).has_errors());
    }

    #[test]
    fn test_issue_display_mentions_date_header() {
        let msg = ReportIssue::NoDateHeader.to_string().to_lowercase();
        assert!(msg.contains("no date header"));
    }
}
