//! JSON Lines (JSONL) output writer.
//!
//! One message object per line, no enclosing array.

use std::fs::File;
use std::io::{BufWriter, Write};

use tracing::debug;

use super::json_writer::JsonMessage;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::LinestatsError;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"Alice","content":"Hello"}
/// {"sender":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(
    messages: &[Message],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), LinestatsError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(messages, &mut writer, config)?;
    writer.flush()?;
    debug!(path = output_path, count = messages.len(), "wrote jsonl");
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String, LinestatsError> {
    let mut buffer = Vec::new();
    write_lines(messages, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(
    messages: &[Message],
    writer: &mut W,
    config: &OutputConfig,
) -> Result<(), LinestatsError> {
    for msg in messages {
        let json_msg = JsonMessage::from_message(msg, config);
        let line = serde_json::to_string(&json_msg)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
