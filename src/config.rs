//! Configuration types for the log parser.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use linestats::config::LineConfig;
//! use linestats::parsers::LineParser;
//!
//! let config = LineConfig::new()
//!     .with_max_failed_samples(50)
//!     .with_date_header_breaks_continuation(false);
//!
//! let parser = LineParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of failed-line excerpts kept in a report.
pub const DEFAULT_MAX_FAILED_SAMPLES: usize = 20;

/// Configuration for LINE chat-history parsing.
///
/// # Example
///
/// ```rust
/// use linestats::config::LineConfig;
///
/// let config = LineConfig::default();
/// assert_eq!(config.max_failed_samples, 20);
/// assert!(config.date_header_breaks_continuation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Maximum number of failed-line excerpts retained (default: 20)
    pub max_failed_samples: usize,

    /// Excerpt length, in characters, for message-shaped lines that failed (default: 100)
    pub excerpt_chars: usize,

    /// Excerpt length, in characters, for lines before the first date header (default: 80)
    pub orphan_excerpt_chars: usize,

    /// Whether a date header closes the open multiline message (default: true)
    ///
    /// When disabled, stray lines after a date header are appended to the
    /// last message of the previous day.
    pub date_header_breaks_continuation: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            max_failed_samples: DEFAULT_MAX_FAILED_SAMPLES,
            excerpt_chars: 100,
            orphan_excerpt_chars: 80,
            date_header_breaks_continuation: true,
        }
    }
}

impl LineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of failed-line excerpts.
    #[must_use]
    pub fn with_max_failed_samples(mut self, count: usize) -> Self {
        self.max_failed_samples = count;
        self
    }

    /// Sets the excerpt length for message-shaped failures.
    #[must_use]
    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    /// Sets the excerpt length for lines before the first date header.
    #[must_use]
    pub fn with_orphan_excerpt_chars(mut self, chars: usize) -> Self {
        self.orphan_excerpt_chars = chars;
        self
    }

    /// Sets whether a date header closes the open multiline message.
    #[must_use]
    pub fn with_date_header_breaks_continuation(mut self, enabled: bool) -> Self {
        self.date_header_breaks_continuation = enabled;
        self
    }
}
