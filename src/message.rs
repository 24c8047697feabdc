//! Typed chat message produced by the log parser.
//!
//! This module provides [`Message`] and [`MessageType`]. Every line of an
//! export that starts a message becomes one [`Message`]; continuation lines
//! are folded into its `content` before the parser hands it out.
//!
//! # Examples
//!
//! ```
//! use linestats::{Message, MessageType};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 5, 20)
//!     .unwrap()
//!     .and_hms_opt(13, 30, 0)
//!     .unwrap();
//! let msg = Message::new(1, ts, "Alice", "Hello", MessageType::Text);
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.hour(), 13);
//! assert_eq!(msg.weekday_index(), 1); // Monday
//! ```
//!
//! ## Serialization
//!
//! ```
//! use linestats::{Message, MessageType};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap().and_hms_opt(13, 31, 0).unwrap();
//! let msg = Message::new(2, ts, "Bob", "[Sticker]", MessageType::Sticker);
//! let json = serde_json::to_string(&msg)?;
//!
//! assert!(json.contains(r#""type":"sticker""#));
//! let parsed: Message = serde_json::from_str(&json)?;
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Sender used when an export line carries no sender name.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Sender assigned to system events synthesized from bare `HH:MM event` lines.
pub const SYSTEM_SENDER: &str = "System";

/// Kind of a message, decided once when the message is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain user-authored text
    #[default]
    Text,
    /// Sticker placeholder
    Sticker,
    /// Photo / image placeholder
    Image,
    /// Video placeholder
    Video,
    /// File attachment placeholder
    File,
    /// Voice or video call record
    Call,
    /// Membership or administrative event, or an unsent message notice
    System,
}

impl MessageType {
    /// Returns the lowercase name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Sticker => "sticker",
            MessageType::Image => "image",
            MessageType::Video => "video",
            MessageType::File => "file",
            MessageType::Call => "call",
            MessageType::System => "system",
        }
    }

    /// Returns `true` for image, video and file placeholders.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            MessageType::Image | MessageType::Video | MessageType::File
        )
    }

    /// Returns all message types.
    pub fn all() -> &'static [MessageType] {
        &[
            MessageType::Text,
            MessageType::Sticker,
            MessageType::Image,
            MessageType::Video,
            MessageType::File,
            MessageType::Call,
            MessageType::System,
        ]
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown message type: '{}'. Expected one of: {}",
                    s,
                    MessageType::all()
                        .iter()
                        .map(MessageType::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// A single parsed chat message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `u64` | 1-based sequence number within one parse run |
/// | `timestamp` | `NaiveDateTime` | Active date header combined with the line's `HH:MM` |
/// | `sender` | `String` | Display name, `"Unknown"` if absent |
/// | `content` | `String` | Text, continuation lines joined with `\n` |
/// | `kind` | [`MessageType`] | Serialized as `type` |
///
/// Timestamps are the wall-clock values written in the export. No time zone
/// is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sequence number, stable within a single parse run only.
    pub id: u64,

    /// When the message was sent, as written in the export.
    pub timestamp: NaiveDateTime,

    /// Display name of the author.
    pub sender: String,

    /// Message text. May contain newlines for multiline messages.
    pub content: String,

    /// Message kind.
    #[serde(rename = "type")]
    pub kind: MessageType,
}

impl Message {
    /// Creates a message. An empty `sender` is replaced with `"Unknown"`.
    pub fn new(
        id: u64,
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
        kind: MessageType,
    ) -> Self {
        let mut sender = sender.into();
        if sender.is_empty() {
            sender = UNKNOWN_SENDER.to_string();
        }
        Self {
            id,
            timestamp,
            sender,
            content: content.into(),
            kind,
        }
    }

    /// Appends a continuation line to the content.
    pub fn push_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the message kind.
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    /// Returns the calendar day of the message.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the hour of day (0-23).
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Returns the weekday with Sunday as 0.
    pub fn weekday_index(&self) -> usize {
        self.timestamp.weekday().num_days_from_sunday() as usize
    }

    /// Returns `true` for system events.
    pub fn is_system(&self) -> bool {
        self.kind == MessageType::System
    }

    /// Returns `true` for image, video and file placeholders.
    pub fn is_media(&self) -> bool {
        self.kind.is_media()
    }
}
