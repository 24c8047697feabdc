//! Filter messages by date range, hour of day and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after the start of that day |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before the end of that day |
//! | Hours | [`with_hours`](FilterConfig::with_hours) | Hour of day in `[start, end)` |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from a specific user |
//!
//! # Examples
//!
//! ```
//! use linestats::core::filter::{FilterConfig, apply_filters};
//! use linestats::parser::parse_line_chat;
//!
//! # fn main() -> linestats::Result<()> {
//! let text = "2024/05/20\n08:00\tAlice\tmorning\n13:00\tBob\tlunch\n2024/05/22\n09:00\tAlice\tlater\n";
//! let messages = parse_line_chat(text).messages;
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-05-20")?
//!     .with_date_to("2024-05-21")?
//!     .with_hours(9, 24)?;
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content, "lunch");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Date bounds are inclusive: the start of the first day to the end of the last day
//! - The hour range is half-open: an hour equal to `end` is excluded
//! - Sender matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::LinestatsError;

/// Half-open range of hours of the day, `start <= hour < end`.
///
/// The full day `0-24` is the inactive default.
///
/// ```
/// use linestats::core::filter::HourRange;
///
/// let office: HourRange = "9-17".parse().unwrap();
/// assert!(office.contains(9));
/// assert!(!office.contains(17));
/// assert!(HourRange::default().is_full_day());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawHourRange")]
pub struct HourRange {
    start: u32,
    end: u32,
}

/// Unvalidated wire shape of [`HourRange`].
#[derive(Deserialize)]
struct RawHourRange {
    start: u32,
    end: u32,
}

impl TryFrom<RawHourRange> for HourRange {
    type Error = LinestatsError;

    fn try_from(raw: RawHourRange) -> Result<Self, Self::Error> {
        HourRange::new(raw.start, raw.end)
    }
}

impl HourRange {
    /// The whole day, `0-24`.
    pub const FULL_DAY: HourRange = HourRange { start: 0, end: 24 };

    /// Creates a range, validating `0 <= start < end <= 24`.
    pub fn new(start: u32, end: u32) -> Result<Self, LinestatsError> {
        if start >= end || end > 24 {
            return Err(LinestatsError::invalid_hour_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// First hour included.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// First hour excluded.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Returns `true` if `hour` falls in `[start, end)`.
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Returns `true` for `0-24`, which filters nothing.
    pub fn is_full_day(&self) -> bool {
        *self == Self::FULL_DAY
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self::FULL_DAY
    }
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for HourRange {
    type Err = LinestatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or_else(|| {
            LinestatsError::invalid_format("hour range", format!("'{s}', expected START-END"))
        })?;
        let parse = |part: &str| {
            part.trim().parse::<u32>().map_err(|_| {
                LinestatsError::invalid_format("hour range", format!("'{s}', expected START-END"))
            })
        };
        HourRange::new(parse(start)?, parse(end)?)
    }
}

/// Configuration for filtering messages.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
///
/// # Examples
///
/// ```
/// use linestats::core::filter::FilterConfig;
///
/// # fn main() -> linestats::Result<()> {
/// // Filter by date range
/// let by_date = FilterConfig::new()
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024/12/31")?;
///
/// // Evenings only, one sender
/// let combined = FilterConfig::new()
///     .with_hours(18, 24)?
///     .with_sender("Alice");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only messages whose hour is in this range.
    #[serde(default)]
    pub hours: HourRange,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive, from 00:00:00).
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYY.MM.DD`.
    ///
    /// # Errors
    ///
    /// Returns [`LinestatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, LinestatsError> {
        self.after = Some(start_of_day(parse_filter_date(date_str)?));
        Ok(self)
    }

    /// Sets the end date filter (inclusive, until 23:59:59).
    ///
    /// # Errors
    ///
    /// Returns [`LinestatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, LinestatsError> {
        self.before = Some(end_of_day(parse_filter_date(date_str)?));
        Ok(self)
    }

    /// Sets both date bounds from calendar days.
    #[must_use]
    pub fn with_days(mut self, first: NaiveDate, last: NaiveDate) -> Self {
        self.after = Some(start_of_day(first));
        self.before = Some(end_of_day(last));
        self
    }

    /// Sets the half-open hour-of-day filter.
    ///
    /// # Errors
    ///
    /// Returns [`LinestatsError::InvalidHourRange`] unless `0 <= start < end <= 24`.
    pub fn with_hours(mut self, start: u32, end: u32) -> Result<Self, LinestatsError> {
        self.hours = HourRange::new(start, end)?;
        Ok(self)
    }

    /// Sets the hour-of-day filter from an already validated range.
    #[must_use]
    pub fn with_hour_range(mut self, hours: HourRange) -> Self {
        self.hours = hours;
        self
    }

    /// Sets the sender filter.
    ///
    /// Matching is case-insensitive for ASCII characters.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_hour_filter() || self.from.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the hour filter narrows the day.
    pub fn has_hour_filter(&self) -> bool {
        !self.hours.is_full_day()
    }

    /// Returns `true` if the message passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref from) = self.from {
            if !msg.sender.eq_ignore_ascii_case(from) {
                return false;
            }
        }

        if self.after.is_some_and(|after| msg.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| msg.timestamp > before) {
            return false;
        }

        self.hours.contains(msg.hour())
    }
}

/// Parses a filter date, accepting `-`, `/` or `.` separators.
pub fn parse_filter_date(date_str: &str) -> Result<NaiveDate, LinestatsError> {
    let normalized = date_str.trim().replace(['/', '.'], "-");
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .map_err(|_| LinestatsError::invalid_date(date_str))
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap()
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59).unwrap()
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns a new vector containing only messages that match all active
/// filters. If no filters are active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| config.matches(msg))
        .collect()
}

/// Borrowing variant of [`apply_filters`], preserving input order.
pub fn filter_messages<'a>(
    messages: &'a [Message],
    config: &'a FilterConfig,
) -> impl Iterator<Item = &'a Message> + 'a {
    messages.iter().filter(move |msg| config.matches(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageType;

    fn make_msg(sender: &str, content: &str, ts: &str) -> Message {
        let timestamp = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M").unwrap();
        Message::new(1, timestamp, sender, content, MessageType::Text)
    }

    #[test]
    fn test_filter_by_sender() {
        let messages = vec![
            make_msg("Alice", "Hello", "2024-05-20 10:00"),
            make_msg("Bob", "Hi", "2024-05-20 10:01"),
            make_msg("alice", "Bye", "2024-05-20 10:02"),
        ];

        let config = FilterConfig::new().with_sender("Alice");
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .iter()
                .all(|m| m.sender.eq_ignore_ascii_case("Alice"))
        );
    }

    #[test]
    fn test_date_range_inclusive_both_ends() {
        let messages = vec![
            make_msg("A", "before", "2024-05-19 23:59"),
            make_msg("A", "first", "2024-05-20 00:00"),
            make_msg("A", "last", "2024-05-21 23:59"),
            make_msg("A", "after", "2024-05-22 00:00"),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-05-20")
            .unwrap()
            .with_date_to("2024-05-21")
            .unwrap();
        let filtered = apply_filters(messages, &config);

        let contents: Vec<_> = filtered.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "last"]);
    }

    #[test]
    fn test_hour_range_half_open() {
        let messages = vec![
            make_msg("A", "8", "2024-05-20 08:59"),
            make_msg("A", "9", "2024-05-20 09:00"),
            make_msg("A", "16", "2024-05-20 16:59"),
            make_msg("A", "17", "2024-05-20 17:00"),
        ];

        let config = FilterConfig::new().with_hours(9, 17).unwrap();
        let filtered = apply_filters(messages, &config);

        let contents: Vec<_> = filtered.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["9", "16"]);
    }

    #[test]
    fn test_slash_and_dot_dates_accepted() {
        assert!(FilterConfig::new().with_date_from("2024/05/20").is_ok());
        assert!(FilterConfig::new().with_date_to("2024.5.20").is_ok());
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("20-05-2024");
        assert!(matches!(result, Err(LinestatsError::InvalidDate { .. })));
    }

    #[test]
    fn test_invalid_hour_ranges() {
        assert!(HourRange::new(9, 9).is_err());
        assert!(HourRange::new(18, 9).is_err());
        assert!(HourRange::new(0, 25).is_err());
        assert!(HourRange::new(23, 24).is_ok());
    }

    #[test]
    fn test_hour_range_from_str() {
        let range: HourRange = " 9 - 17 ".trim().parse().unwrap();
        assert_eq!((range.start(), range.end()), (9, 17));
        assert_eq!(range.to_string(), "9-17");
        assert!("9".parse::<HourRange>().is_err());
        assert!("a-b".parse::<HourRange>().is_err());
        assert!("17-9".parse::<HourRange>().unwrap_err().is_invalid_hour_range());
    }

    #[test]
    fn test_hour_range_deserialize_validates() {
        let ok: FilterConfig = serde_json::from_str(r#"{"hours":{"start":9,"end":17}}"#).unwrap();
        assert_eq!(ok.hours, HourRange::new(9, 17).unwrap());

        let reversed = serde_json::from_str::<FilterConfig>(r#"{"hours":{"start":20,"end":5}}"#);
        assert!(reversed.is_err());
        assert!(serde_json::from_str::<HourRange>(r#"{"start":0,"end":25}"#).is_err());
    }

    #[test]
    fn test_filter_config_json_round_trip() {
        let config = FilterConfig::new()
            .with_date_from("2024-05-20")
            .unwrap()
            .with_hours(20, 24)
            .unwrap()
            .with_sender("Alice");
        let json = serde_json::to_string(&config).unwrap();
        let back: FilterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_with_days() {
        let first = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let config = FilterConfig::new().with_days(first, first);
        assert!(config.matches(&make_msg("A", "x", "2024-05-20 23:59")));
        assert!(!config.matches(&make_msg("A", "x", "2024-05-21 00:00")));
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_sender("Alice").is_active());
        assert!(FilterConfig::new().with_hours(0, 12).unwrap().is_active());
        assert!(!FilterConfig::new().with_hours(0, 24).unwrap().is_active());
        assert!(
            FilterConfig::new()
                .with_date_from("2024-01-01")
                .unwrap()
                .is_active()
        );
    }

    #[test]
    fn test_filter_messages_borrows_in_order() {
        let messages = vec![
            make_msg("A", "1", "2024-05-20 10:00"),
            make_msg("B", "2", "2024-05-20 11:00"),
            make_msg("A", "3", "2024-05-20 12:00"),
        ];
        let config = FilterConfig::new().with_sender("A");
        let contents: Vec<_> = filter_messages(&messages, &config)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["1", "3"]);
    }
}
