//! Parser entry point: export file to [`ChatTable`].
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlens::parser::ChatParser;
//! use std::path::Path;
//!
//! let parser = ChatParser::new();
//! let table = parser.load(Path::new("chat_export.txt"))?;
//!
//! for msg in table.iter() {
//!     println!("{} {}: {}", msg.timestamp, msg.author, msg.body);
//! }
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! In-memory content works the same way:
//!
//! ```rust
//! use chatlens::parser::ChatParser;
//!
//! let table = ChatParser::new().parse_str(
//!     "12/25/2023, 10:31 AM - Bob: Merry Christmas to you too\n\
//!      12/25/2023, 10:30 AM - Alice: Hey! Merry Christmas!",
//! )?;
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.messages()[0].author, "Alice");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::ParserConfig;
use crate::error::ChatlensError;
use crate::parsing::{
    IndicatorSet, LineClassifier, MessageAssembler, MessageClassifier, ParseStats,
    TimestampNormalizer,
};
use crate::table::ChatTable;

/// Parses chat exports into time-sorted [`ChatTable`]s.
///
/// Holds the compiled grammars and classifier built from a
/// [`ParserConfig`]; one parser can be reused for many files.
#[derive(Debug, Clone)]
pub struct ChatParser {
    config: ParserConfig,
    lines: LineClassifier,
    stamps: TimestampNormalizer,
    tags: MessageClassifier,
}

impl ChatParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            lines: LineClassifier::new(),
            stamps: TimestampNormalizer::new(),
            tags: MessageClassifier::new(),
        }
    }

    /// Creates a parser with custom configuration.
    ///
    /// Fails if a grammar pattern does not compile.
    pub fn with_config(config: ParserConfig) -> Result<Self, ChatlensError> {
        let lines = LineClassifier::from_specs(&config.grammars)?;
        let stamps = TimestampNormalizer::with_formats(config.timestamp_formats.clone());
        let tags = MessageClassifier::with_indicators(
            IndicatorSet::new(&config.media_indicators),
            IndicatorSet::new(&config.system_indicators),
        )
        .with_system_authors(&config.system_authors);

        Ok(Self {
            config,
            lines,
            stamps,
            tags,
        })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the line classifier in use.
    pub fn line_classifier(&self) -> &LineClassifier {
        &self.lines
    }

    /// Returns the message classifier in use.
    pub fn message_classifier(&self) -> &MessageClassifier {
        &self.tags
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// - [`ChatlensError::MissingFile`] if `path` does not exist
    /// - [`ChatlensError::TimestampFormat`] if any header timestamp is unparsable
    /// - [`ChatlensError::Io`] for other read failures
    pub fn load(&self, path: &Path) -> Result<ChatTable, ChatlensError> {
        self.load_with_stats(path).map(|(table, _)| table)
    }

    /// Like [`load`](Self::load), also returning assembly counters.
    pub fn load_with_stats(&self, path: &Path) -> Result<(ChatTable, ParseStats), ChatlensError> {
        if !path.exists() {
            return Err(ChatlensError::missing_file(path));
        }
        let content = fs::read_to_string(path)?;
        let (table, stats) = self.parse_str_with_stats(&content)?;
        info!(
            path = %path.display(),
            messages = stats.messages,
            lines = stats.lines_total,
            "chat export loaded"
        );
        Ok((table, stats))
    }

    /// Parses export content held in memory.
    pub fn parse_str(&self, content: &str) -> Result<ChatTable, ChatlensError> {
        self.parse_str_with_stats(content).map(|(table, _)| table)
    }

    /// Like [`parse_str`](Self::parse_str), also returning assembly counters.
    pub fn parse_str_with_stats(
        &self,
        content: &str,
    ) -> Result<(ChatTable, ParseStats), ChatlensError> {
        let mut assembler = MessageAssembler::new(&self.lines, &self.stamps, &self.tags);
        for line in content.lines() {
            assembler.push_line(line)?;
        }
        let (messages, stats) = assembler.finish();
        debug!(
            headers = stats.header_lines,
            continuations = stats.continuation_lines,
            orphans = stats.orphan_lines,
            "assembly finished"
        );
        Ok((ChatTable::from_messages(messages), stats))
    }
}

impl Default for ChatParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads an export with the default parser.
///
/// Shorthand for `ChatParser::new().load(path)`.
pub fn load(path: impl AsRef<Path>) -> Result<ChatTable, ChatlensError> {
    ChatParser::new().load(path.as_ref())
}
