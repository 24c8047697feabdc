//! Filtering, statistics and output over parsed messages.
//!
//! This module contains:
//! - [`models`] - Output configuration
//! - [`filter`] - Message filtering by date, hour of day and sender
//! - [`stats`] - Rankings and activity histograms
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use linestats::core::{FilterConfig, apply_filters, compute_stats};
//! use linestats::parser::parse_line_chat;
//!
//! # fn main() -> linestats::Result<()> {
//! let messages = parse_line_chat("2024/05/20\n09:00\tAlice\tHi\n21:00\tBob\tNight\n").messages;
//! let evening = apply_filters(messages, &FilterConfig::new().with_hours(18, 24)?);
//! let stats = compute_stats(&evening);
//! assert_eq!(stats.ranking[0].name, "Bob");
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod stats;

// Re-export main types for convenience
pub use filter::{FilterConfig, HourRange, apply_filters, filter_messages};
pub use models::OutputConfig;
pub use stats::{ChatStats, MediaCount, SenderCount, compute_stats};

// Re-export Message from the crate root
pub use crate::Message;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
