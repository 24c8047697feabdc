//! # linestats
//!
//! Parse LINE "Save chat history" text exports into typed messages and
//! compute usage statistics over them.
//!
//! ## Overview
//!
//! An export is a loosely formatted text file: date header lines such as
//! `2024/05/20(Mon)` followed by `HH:MM<TAB>Sender<TAB>Content` lines, with
//! multiline bodies, media placeholders, calls and membership events mixed
//! in. Parsing is a single forward pass that never fails on malformed input;
//! everything it cannot attribute is counted in a [`ParseReport`].
//!
//! ## Quick Start
//!
//! ```rust
//! use linestats::prelude::*;
//!
//! let text = "2024/05/20(Mon)\n13:30\tAlice\tHello\n13:31\tBob\t[Sticker]\n";
//! let result = parse_line_chat(text);
//!
//! assert_eq!(result.messages.len(), 2);
//! assert_eq!(result.messages[1].kind, MessageType::Sticker);
//!
//! let stats = compute_stats(&result.messages);
//! assert_eq!(stats.sticker_ranking[0].name, "Bob");
//! ```
//!
//! ## Sessions
//!
//! [`ChatSession`](session::ChatSession) holds one loaded export together
//! with date, hour and sender filters, and recomputes views on demand:
//!
//! ```rust,no_run
//! use linestats::session::ChatSession;
//!
//! # fn main() -> linestats::Result<()> {
//! let mut session = ChatSession::new();
//! session.load_file("[LINE] Chat with Alice.txt")?;
//! session.set_hour_range(22, 24)?;
//! println!("{} late-night messages", session.stats().total_messages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Parser`](parser::Parser) trait, [`ParseResult`](parser::ParseResult), [`parse_line_chat`](parser::parse_line_chat)
//! - [`parsers`] - [`LineParser`](parsers::LineParser)
//! - [`parsing`] - line grammar and message-type classification
//! - [`report`] - [`ParseReport`], [`ParseStats`](report::ParseStats), [`ReportIssue`](report::ReportIssue)
//! - [`config`] - [`LineConfig`](config::LineConfig)
//! - [`core`] - filtering, statistics and output writers
//! - [`session`] - stateful holder with filters
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and writer dispatch
//! - [`error`] - [`LinestatsError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod report;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use error::{LinestatsError, Result};
pub use message::{Message, MessageType};
pub use report::ParseReport;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use linestats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Message, MessageType};

    pub use crate::error::{LinestatsError, Result};

    pub use crate::parser::{ParseResult, Parser, parse_line_chat};
    pub use crate::parsers::LineParser;
    pub use crate::report::{ParseReport, ParseStats, ReportIssue};

    pub use crate::config::LineConfig;

    pub use crate::core::filter::{FilterConfig, HourRange, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::stats::{ChatStats, compute_stats};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::OutputFormat;
    pub use crate::session::ChatSession;
}
