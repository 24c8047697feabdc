//! Shared parsing utilities for LINE chat-history exports.
//!
//! This module holds the line grammar and the message-type vocabulary. The
//! stateful pass that strings them together lives in
//! [`parsers::LineParser`](crate::parsers::LineParser).

pub mod classify;
pub mod line;

// Re-export commonly used items
pub use classify::{Matcher, TypeRule, classify_message, detect_message_type, is_system_phrase};
pub use line::{
    MessageCandidate, MessageForm, build_timestamp, match_date_header, message_candidates,
    starts_with_time,
};
