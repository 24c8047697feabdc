//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::Message;
use crate::core::models::{OUTPUT_TIMESTAMP_FORMAT, OutputConfig};
use crate::error::LinestatsError;

/// Minimal message structure for JSON output.
/// Only includes fields enabled in `OutputConfig`.
#[derive(Serialize)]
pub(super) struct JsonMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    sender: &'a str,
    content: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl<'a> JsonMessage<'a> {
    pub(super) fn from_message(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            id: config.include_ids.then_some(msg.id),
            timestamp: config
                .include_timestamps
                .then(|| msg.timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string()),
            sender: &msg.sender,
            content: &msg.content,
            kind: config.include_types.then(|| msg.kind.as_str()),
        }
    }
}

/// Writes messages to JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "content": "Hello"},
///   {"sender": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn write_json(
    messages: &[Message],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), LinestatsError> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    debug!(path = output_path, count = messages.len(), "wrote json");
    Ok(())
}

/// Converts messages to JSON string as an array.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String, LinestatsError> {
    let json_messages: Vec<JsonMessage<'_>> = messages
        .iter()
        .map(|m| JsonMessage::from_message(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_messages)?)
}
