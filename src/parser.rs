//! Parser trait and parse result for chat-history exports.
//!
//! # Example
//!
//! ```rust
//! use linestats::parser::{Parser, parse_line_chat};
//! use linestats::MessageType;
//!
//! let result = parse_line_chat("2024/05/20(Mon)\n13:30\tAlice\tHello\n13:31\tBob\t[Sticker]\n");
//!
//! assert_eq!(result.messages.len(), 2);
//! assert_eq!(result.messages[1].kind, MessageType::Sticker);
//! assert_eq!(result.report.stats.date_headers, 1);
//! ```
//!
//! Reading from disk goes through [`Parser::parse`], the only fallible step:
//!
//! ```rust,no_run
//! use linestats::parser::Parser;
//! use linestats::parsers::LineParser;
//! use std::path::Path;
//!
//! let result = LineParser::new().parse(Path::new("[LINE] Chat with Alice.txt"))?;
//! for issue in &result.report.errors {
//!     eprintln!("warning: {issue}");
//! }
//! # Ok::<(), linestats::LinestatsError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::LinestatsError;
use crate::parsers::LineParser;
use crate::report::ParseReport;

/// Messages and diagnostics produced by one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Messages in input order.
    pub messages: Vec<Message>,
    /// Counters, failed-line samples and advisory issues.
    pub report: ParseReport,
}

impl ParseResult {
    /// Returns `true` if no message was produced.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Splits the result into its messages and report.
    pub fn into_parts(self) -> (Vec<Message>, ParseReport) {
        (self.messages, self.report)
    }
}

/// Trait for chat-history parsers.
///
/// Parsing content never fails: malformed lines are recorded in the
/// returned [`ParseReport`]. Only reading a file can produce an error.
///
/// # Implementation Notes
///
/// Parsers must implement [`name`](Parser::name) and
/// [`parse_str`](Parser::parse_str). File handling has a default
/// implementation that decodes UTF-8 and delegates to `parse_str`.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses export content held in memory.
    fn parse_str(&self, content: &str) -> ParseResult;

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`LinestatsError::Io`] if the file cannot be read and
    /// [`LinestatsError::Utf8`] if it is not valid UTF-8.
    fn parse(&self, path: &Path) -> Result<ParseResult, LinestatsError> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| LinestatsError::utf8(path.display().to_string(), e))?;
        Ok(self.parse_str(&content))
    }

    /// Reads and parses an export file (convenience method accepting &str path).
    fn parse_file(&self, path: &str) -> Result<ParseResult, LinestatsError> {
        self.parse(Path::new(path))
    }
}

/// Parses a LINE chat-history export with the default configuration.
pub fn parse_line_chat(text: &str) -> ParseResult {
    LineParser::new().parse_str(text)
}
