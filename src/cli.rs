//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! Available with the `cli` feature.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::filter::HourRange;
use crate::core::models::OutputConfig;

/// Parse a LINE chat-history export and print who talks, when and how much.
#[derive(Parser, Debug, Clone)]
#[command(name = "linestats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    linestats \"[LINE] Chat with Alice.txt\"
    linestats chat.txt --from 2024-01-01 --to 2024-06-30
    linestats chat.txt --hours 22-24 --sender Bob
    linestats chat.txt -o messages.jsonl -t
    linestats chat.txt --json > summary.json")]
pub struct Args {
    /// Path to the exported chat history (.txt)
    pub input: String,

    /// Write the filtered messages to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Output format (detected from the output extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the parse report and statistics as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Only messages sent in this hour range, end excluded (e.g. 9-17)
    #[arg(long, value_name = "START-END", value_parser = parse_hours)]
    pub hours: Option<HourRange>,

    /// Only messages from this sender
    #[arg(long, value_name = "USER")]
    pub sender: Option<String>,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include message IDs in output
    #[arg(long)]
    pub ids: bool,

    /// Include message types in output
    #[arg(long)]
    pub types: bool,

    /// Number of senders shown per ranking
    #[arg(long, default_value_t = 10, value_name = "N")]
    pub top: usize,
}

impl Args {
    /// Output columns selected by the flags.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_timestamps: self.timestamps,
            include_ids: self.ids,
            include_types: self.types,
        }
    }

    /// Returns `true` if any filter flag was given.
    pub fn has_filters(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.hours.is_some() || self.sender.is_some()
    }
}

fn parse_hours(s: &str) -> Result<HourRange, String> {
    s.parse().map_err(|e: crate::LinestatsError| e.to_string())
}

/// Output format options.
///
/// ```rust
/// use linestats::cli::OutputFormat;
///
/// let format: linestats::format::OutputFormat = OutputFormat::Jsonl.into();
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::format::OutputFormat::from(*self).fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
