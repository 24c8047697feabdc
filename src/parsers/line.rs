//! LINE chat-history text parser.
//!
//! A single forward pass over physical lines. The only state carried between
//! lines is the active date header and the message that continuation lines
//! attach to; both live in `ParseState`, which is folded over the input so
//! the parser stays a pure function of its text.
//!
//! Per line, first match wins:
//!
//! 1. blank line
//! 2. date header (`2024/05/20(Mon)`, `2024-05-20`, `2024.5.20`)
//! 3. message start: tab form, then space form, then bare system event
//! 4. continuation of the open message
//! 5. skipped: a time-shaped line, or any text before the first date header
//!
//! Anything else (stray text after a header with no open message) is ignored.

use crate::Message;
use crate::config::LineConfig;
use crate::message::MessageType;
use crate::parser::{ParseResult, Parser};
use crate::parsing::{
    MessageForm, build_timestamp, classify_message, match_date_header, message_candidates,
    starts_with_time,
};
use crate::report::{ParseReport, ParseStats, SampleBuffer};

/// Parser for LINE chat-history exports.
///
/// # Example
///
/// ```rust
/// use linestats::parser::Parser;
/// use linestats::parsers::LineParser;
///
/// let text = "2024/05/20\n13:30\tAlice\tLine one\nLine two\n";
/// let result = LineParser::new().parse_str(text);
/// assert_eq!(result.messages[0].content, "Line one\nLine two");
/// ```
#[derive(Debug, Clone)]
pub struct LineParser {
    config: LineConfig,
}

impl LineParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: LineConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: LineConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    fn parse_content(&self, text: &str) -> ParseResult {
        text.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .enumerate()
            .fold(ParseState::new(&self.config), |mut state, (index, line)| {
                state.step(index, line);
                state
            })
            .finish()
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for LineParser {
    fn name(&self) -> &'static str {
        "LINE"
    }

    fn parse_str(&self, content: &str) -> ParseResult {
        self.parse_content(content)
    }
}

/// What a single line contributed to the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Blank,
    DateHeader,
    Message,
    Continuation,
    Skipped,
    Ignored,
}

/// Mutable state threaded through the fold.
struct ParseState<'c> {
    config: &'c LineConfig,
    /// Normalized `YYYY/MM/DD` of the last header.
    date: Option<String>,
    /// Index of the message continuation lines attach to.
    open: Option<usize>,
    messages: Vec<Message>,
    stats: ParseStats,
}

impl<'c> ParseState<'c> {
    fn new(config: &'c LineConfig) -> Self {
        Self {
            config,
            date: None,
            open: None,
            messages: Vec::new(),
            stats: ParseStats {
                failed_lines: SampleBuffer::new(config.max_failed_samples),
                ..ParseStats::default()
            },
        }
    }

    fn step(&mut self, index: usize, raw: &str) -> LineOutcome {
        self.stats.total_lines += 1;
        let line = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

        if line.is_empty() {
            self.stats.empty_lines += 1;
            return LineOutcome::Blank;
        }

        if let Some(date) = match_date_header(line) {
            self.date = Some(date);
            self.stats.date_headers += 1;
            if self.config.date_header_breaks_continuation {
                self.open = None;
            }
            return LineOutcome::DateHeader;
        }

        if let Some(date) = self.date.as_deref() {
            let mut rejected = false;
            for candidate in message_candidates(line) {
                let Some(timestamp) = build_timestamp(date, candidate.time) else {
                    rejected = true;
                    continue;
                };

                let kind = match candidate.form {
                    MessageForm::SystemEvent => MessageType::System,
                    MessageForm::Tab | MessageForm::Space => {
                        classify_message(candidate.sender, candidate.content)
                    }
                };
                let id = self.messages.len() as u64 + 1;
                self.messages.push(Message::new(
                    id,
                    timestamp,
                    candidate.sender,
                    candidate.content,
                    kind,
                ));
                self.open = Some(self.messages.len() - 1);
                return LineOutcome::Message;
            }
            if rejected {
                self.stats.invalid_timestamps += 1;
            }
        }

        if let Some(open) = self.open {
            self.messages[open].push_line(line);
            self.stats.continuation_lines += 1;
            return LineOutcome::Continuation;
        }

        let line_no = index + 1;
        if starts_with_time(line) {
            let max = self.config.excerpt_chars;
            self.stats.skipped_lines += 1;
            self.stats
                .failed_lines
                .push_with(|| format!("line {}: {}", line_no, excerpt(line, max)));
            LineOutcome::Skipped
        } else if self.date.is_none() {
            let max = self.config.orphan_excerpt_chars;
            self.stats.skipped_lines += 1;
            self.stats
                .failed_lines
                .push_with(|| format!("line {} (no date): {}", line_no, excerpt(line, max)));
            LineOutcome::Skipped
        } else {
            LineOutcome::Ignored
        }
    }

    fn finish(mut self) -> ParseResult {
        self.stats.parsed_messages = self.messages.len();
        ParseResult {
            messages: self.messages,
            report: ParseReport::from_stats(self.stats),
        }
    }
}

/// Returns at most the first `max_chars` characters of `line`.
fn excerpt(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &line[..byte_idx],
        None => line,
    }
}
