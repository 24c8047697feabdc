//! Chat-history parsers.
//!
//! - [`LineParser`] - Parses LINE "Save chat history" text exports
//!
//! # Example
//!
//! ```rust
//! use linestats::parser::Parser;
//! use linestats::parsers::LineParser;
//!
//! let parser = LineParser::new();
//! let result = parser.parse_str("2024/05/20\n13:30\tAlice\tHello\n");
//! assert_eq!(result.messages.len(), 1);
//! ```

mod line;

pub use line::LineParser;
