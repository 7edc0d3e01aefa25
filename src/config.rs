//! Configuration types for parsing and analysis.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - grammars, timestamp formats and classifier indicators
//! - [`AnalysisConfig`] - time windows and limits used by [`crate::analysis`]
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::ParserConfig;
//! use chatlens::parser::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_media_indicators(["<Media omitted>", "[photo]"]);
//!
//! let parser = ChatParser::with_config(config)?;
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::parsing::{
    DEFAULT_MEDIA_INDICATORS, DEFAULT_SYSTEM_AUTHORS, DEFAULT_SYSTEM_INDICATORS, GrammarSpec,
    default_formats, default_grammars,
};

/// Configuration for export parsing.
///
/// Every list is ordered where order matters: grammars by their `priority`,
/// timestamp formats by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Header grammars (default: bracketed, unbracketed, loose)
    pub grammars: Vec<GrammarSpec>,

    /// chrono formats tried in order against canonical timestamps
    pub timestamp_formats: Vec<String>,

    /// Substrings marking a media attachment
    pub media_indicators: Vec<String>,

    /// Substrings marking an administrative notification
    pub system_indicators: Vec<String>,

    /// Author names marking an administrative notification
    pub system_authors: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            grammars: default_grammars(),
            timestamp_formats: default_formats(),
            media_indicators: to_strings(DEFAULT_MEDIA_INDICATORS),
            system_indicators: to_strings(DEFAULT_SYSTEM_INDICATORS),
            system_authors: to_strings(DEFAULT_SYSTEM_AUTHORS),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the grammar list.
    #[must_use]
    pub fn with_grammars(mut self, grammars: Vec<GrammarSpec>) -> Self {
        self.grammars = grammars;
        self
    }

    /// Adds one grammar to the list.
    #[must_use]
    pub fn add_grammar(mut self, grammar: GrammarSpec) -> Self {
        self.grammars.push(grammar);
        self
    }

    /// Replaces the timestamp format list.
    #[must_use]
    pub fn with_timestamp_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.timestamp_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the media indicators.
    #[must_use]
    pub fn with_media_indicators<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_indicators = indicators.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the system indicators.
    #[must_use]
    pub fn with_system_indicators<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_indicators = indicators.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the system author names.
    #[must_use]
    pub fn with_system_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_authors = authors.into_iter().map(Into::into).collect();
        self
    }
}

/// Configuration for downstream analysis.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_interaction_window(15)
///     .with_top_n(5);
/// assert_eq!(config.interaction_window_minutes, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Max gap for a message to count as a response (default: 120)
    pub response_window_minutes: i64,

    /// Max gap for an interaction-matrix edge (default: 30)
    pub interaction_window_minutes: i64,

    /// Max gap for reply-pattern samples (default: 60)
    pub reply_window_minutes: i64,

    /// Min samples before a reply pattern is reported (default: 3)
    pub min_reply_samples: usize,

    /// Silence that starts a new conversation (default: 1 hour)
    pub conversation_gap_hours: i64,

    /// Shortest word counted in word frequency (default: 3)
    pub min_word_length: usize,

    /// Shortest word counted as a topic (default: 4)
    pub topic_min_word_length: usize,

    /// Default length of "top N" lists (default: 20)
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            response_window_minutes: 120,
            interaction_window_minutes: 30,
            reply_window_minutes: 60,
            min_reply_samples: 3,
            conversation_gap_hours: 1,
            min_word_length: 3,
            topic_min_word_length: 4,
            top_n: 20,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the response-time window in minutes.
    #[must_use]
    pub fn with_response_window(mut self, minutes: i64) -> Self {
        self.response_window_minutes = minutes;
        self
    }

    /// Sets the interaction-matrix window in minutes.
    #[must_use]
    pub fn with_interaction_window(mut self, minutes: i64) -> Self {
        self.interaction_window_minutes = minutes;
        self
    }

    /// Sets the reply-pattern window in minutes.
    #[must_use]
    pub fn with_reply_window(mut self, minutes: i64) -> Self {
        self.reply_window_minutes = minutes;
        self
    }

    /// Sets the minimum number of reply samples per pair.
    #[must_use]
    pub fn with_min_reply_samples(mut self, samples: usize) -> Self {
        self.min_reply_samples = samples;
        self
    }

    /// Sets the conversation gap in hours.
    #[must_use]
    pub fn with_conversation_gap(mut self, hours: i64) -> Self {
        self.conversation_gap_hours = hours;
        self
    }

    /// Sets the minimum word length for word frequency.
    #[must_use]
    pub fn with_min_word_length(mut self, len: usize) -> Self {
        self.min_word_length = len;
        self
    }

    /// Sets the default top-N list length.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }
}

#[cfg(feature = "json-output")]
macro_rules! json_io {
    ($ty:ty) => {
        impl $ty {
            /// Reads the configuration from a JSON file.
            pub fn from_json_file(
                path: impl AsRef<std::path::Path>,
            ) -> Result<Self, crate::error::ChatlensError> {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&content)?)
            }

            /// Writes the configuration to a JSON file.
            pub fn to_json_file(
                &self,
                path: impl AsRef<std::path::Path>,
            ) -> Result<(), crate::error::ChatlensError> {
                std::fs::write(path, serde_json::to_string_pretty(self)?)?;
                Ok(())
            }
        }
    };
}

#[cfg(feature = "json-output")]
json_io!(ParserConfig);
#[cfg(feature = "json-output")]
json_io!(AnalysisConfig);

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
