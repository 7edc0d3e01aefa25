//! Output configuration shared by the table writers.

use serde::{Deserialize, Serialize};

/// Timestamp layout used by every writer.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for output format.
/// Controls which columns beyond author and body are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include the message timestamp
    pub include_timestamps: bool,
    /// Include the `is_media` / `is_system` flags
    pub include_flags: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every column.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_flags: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_flags(mut self) -> Self {
        self.include_flags = true;
        self
    }
}
