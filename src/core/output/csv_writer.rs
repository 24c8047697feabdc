//! CSV output writer.

use std::fs::File;
use std::io::Write;

use tracing::debug;

use crate::Message;
use crate::core::models::{OUTPUT_TIMESTAMP_FORMAT, OutputConfig};
use crate::error::LinestatsError;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Sender`, `Content`
///   - With IDs: `ID` first
///   - With timestamps: `Timestamp` before `Sender`
///   - With types: `Type` last
/// - Encoding: UTF-8
pub fn write_csv(
    messages: &[Message],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), LinestatsError> {
    let file = File::create(output_path)?;
    write_records(messages, file, config)?;
    debug!(path = output_path, count = messages.len(), "wrote csv");
    Ok(())
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], returned in memory.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String, LinestatsError> {
    let mut buffer = Vec::new();
    write_records(messages, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(
    messages: &[Message],
    sink: W,
    config: &OutputConfig,
) -> Result<(), LinestatsError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.push("Sender");
    header.push("Content");

    if config.include_types {
        header.push("Type");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_ids {
        record.push(msg.id.to_string());
    }
    if config.include_timestamps {
        record.push(msg.timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string());
    }

    record.push(msg.sender.clone());
    record.push(msg.content.clone());

    if config.include_types {
        record.push(msg.kind.as_str().to_string());
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageType;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn sample() -> Vec<Message> {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        vec![
            Message::new(1, ts, "Alice", "Hello", MessageType::Text),
            Message::new(2, ts, "Bob", "[Sticker]", MessageType::Sticker),
        ]
    }

    #[test]
    fn test_write_csv_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_csv(&sample(), path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Sender;Content"));
        assert!(content.contains("Alice;Hello"));
        assert!(content.contains("Bob;[Sticker]"));
    }

    #[test]
    fn test_to_csv_all_columns() {
        let csv = to_csv(&sample(), &OutputConfig::all()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("ID;Timestamp;Sender;Content;Type"));
        assert_eq!(lines.next(), Some("1;2024-06-15 12:30;Alice;Hello;text"));
        assert_eq!(lines.next(), Some("2;2024-06-15 12:30;Bob;[Sticker];sticker"));
    }

    #[test]
    fn test_multiline_content_is_quoted() {
        let mut messages = sample();
        messages[0].push_line("second; line");
        let csv = to_csv(&messages[..1], &OutputConfig::new()).unwrap();
        assert!(csv.contains("Alice;\"Hello\nsecond; line\""));
    }
}
