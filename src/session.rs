//! Stateful holder for one loaded chat export.
//!
//! [`ChatSession`] parses once per load, keeps the messages and report,
//! and serves filtered views and statistics on demand. Loading again fully
//! replaces the previous state.
//!
//! # Example
//!
//! ```rust
//! use linestats::session::ChatSession;
//!
//! # fn main() -> linestats::Result<()> {
//! let mut session = ChatSession::new();
//! session.load_str("2024/05/20\n08:00\tAlice\tmorning\n2024/05/21\n20:00\tBob\tevening\n");
//!
//! let (first, last) = session.default_date_range().unwrap();
//! assert_eq!(first.to_string(), "2024-05-20");
//! assert_eq!(last.to_string(), "2024-05-21");
//!
//! session.set_hour_range(18, 24)?;
//! assert_eq!(session.filtered_messages().len(), 1);
//! assert_eq!(session.stats().ranking[0].name, "Bob");
//! assert_eq!(session.participants(), vec!["Alice", "Bob"]);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::Message;
use crate::config::LineConfig;
use crate::core::filter::{FilterConfig, HourRange, parse_filter_date};
use crate::core::stats::{ChatStats, compute_stats};
use crate::error::LinestatsError;
use crate::parser::{ParseResult, Parser};
use crate::parsers::LineParser;
use crate::report::ParseReport;

/// Loaded messages plus the active filters.
#[derive(Debug, Default)]
pub struct ChatSession {
    parser: LineParser,
    result: ParseResult,
    loaded: bool,
    filter: FilterConfig,
    default_range: Option<(NaiveDate, NaiveDate)>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session whose loads use a custom parser configuration.
    pub fn with_config(config: LineConfig) -> Self {
        Self {
            parser: LineParser::with_config(config),
            ..Self::default()
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Parses `text`, replacing all prior state.
    ///
    /// Resets filters and sets the date range to span the first and last
    /// calendar day present in the messages.
    pub fn load_str(&mut self, text: &str) -> &ParseResult {
        let result = self.parser.parse_str(text);

        self.default_range = day_span(&result.messages);
        self.filter = self.default_filter();

        let stats = &result.report.stats;
        debug!(
            total_lines = stats.total_lines,
            messages = stats.parsed_messages,
            date_headers = stats.date_headers,
            skipped = stats.skipped_lines,
            "loaded chat export"
        );
        for issue in &result.report.errors {
            warn!("{issue}");
        }

        self.result = result;
        self.loaded = true;
        &self.result
    }

    /// Reads and parses a file, replacing all prior state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8. The
    /// session is left unchanged in that case.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&ParseResult, LinestatsError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| LinestatsError::utf8(path.display().to_string(), e))?;
        debug!(path = %path.display(), "reading chat export");
        Ok(self.load_str(&text))
    }

    /// Clears messages, report and filters.
    pub fn reset(&mut self) {
        debug!("session reset");
        let parser = std::mem::take(&mut self.parser);
        *self = Self {
            parser,
            ..Self::default()
        };
    }

    /// Returns `true` once something has been loaded since the last reset.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Restores the default date range, the full day and all senders.
    pub fn clear_filters(&mut self) {
        debug!("filters cleared");
        self.filter = self.default_filter();
    }

    /// Drops the report issues while keeping messages and filters.
    pub fn dismiss_warnings(&mut self) {
        debug!(count = self.result.report.errors.len(), "warnings dismissed");
        self.result.report.errors.clear();
    }

    /// Sets an inclusive date range from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`LinestatsError::InvalidDate`] if either date is malformed.
    /// Filters are unchanged on error.
    pub fn set_date_range(&mut self, from: &str, to: &str) -> Result<(), LinestatsError> {
        let first = parse_filter_date(from)?;
        let last = parse_filter_date(to)?;
        self.set_days(first, last);
        Ok(())
    }

    /// Sets an inclusive date range from calendar days.
    pub fn set_days(&mut self, first: NaiveDate, last: NaiveDate) {
        debug!(%first, %last, "date range set");
        self.filter = std::mem::take(&mut self.filter).with_days(first, last);
    }

    /// Sets the half-open hour-of-day filter.
    ///
    /// # Errors
    ///
    /// Returns [`LinestatsError::InvalidHourRange`] unless `0 <= start < end <= 24`.
    pub fn set_hour_range(&mut self, start: u32, end: u32) -> Result<(), LinestatsError> {
        self.filter.hours = HourRange::new(start, end)?;
        debug!(hours = %self.filter.hours, "hour range set");
        Ok(())
    }

    /// Restricts views to one sender, or lifts the restriction with `None`.
    pub fn set_sender(&mut self, sender: Option<String>) {
        debug!(sender = ?sender, "sender filter set");
        self.filter.from = sender;
    }

    /// Active filter configuration.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// First and last calendar day of the loaded messages.
    pub fn default_date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.default_range
    }

    fn default_filter(&self) -> FilterConfig {
        match self.default_range {
            Some((first, last)) => FilterConfig::new().with_days(first, last),
            None => FilterConfig::new(),
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// All loaded messages, unfiltered.
    pub fn messages(&self) -> &[Message] {
        &self.result.messages
    }

    /// Diagnostics of the last load.
    pub fn report(&self) -> &ParseReport {
        &self.result.report
    }

    /// Messages passing the active filters, in input order.
    pub fn filtered_messages(&self) -> Vec<&Message> {
        self.result
            .messages
            .iter()
            .filter(|msg| self.filter.matches(msg))
            .collect()
    }

    /// Statistics over [`filtered_messages`](Self::filtered_messages).
    pub fn stats(&self) -> ChatStats {
        compute_stats(
            self.result
                .messages
                .iter()
                .filter(|msg| self.filter.matches(msg)),
        )
    }

    /// Distinct senders over all loaded messages, in first-appearance order.
    pub fn participants(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.result
            .messages
            .iter()
            .map(|msg| msg.sender.as_str())
            .filter(|sender| seen.insert(*sender))
            .collect()
    }
}

fn day_span(messages: &[Message]) -> Option<(NaiveDate, NaiveDate)> {
    let first = messages.iter().map(Message::date).min()?;
    let last = messages.iter().map(Message::date).max()?;
    Some((first, last))
}
