//! Output configuration shared by the message writers.

use serde::{Deserialize, Serialize};

/// Timestamp layout used by every writer.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Configuration for output format.
/// Controls which metadata fields are written next to sender and content.
///
/// ```
/// use linestats::core::models::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps().with_types();
/// assert!(config.include_timestamps);
/// assert!(!config.include_ids);
/// assert!(OutputConfig::all().include_ids);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include timestamps in output
    pub include_timestamps: bool,
    /// Include message IDs in output
    pub include_ids: bool,
    /// Include message types in output
    pub include_types: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional field enabled.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_ids: true,
            include_types: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    #[must_use]
    pub fn with_types(mut self) -> Self {
        self.include_types = true;
        self
    }
}
