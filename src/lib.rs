//! # Chatlens
//!
//! A Rust library for turning exported chat transcripts (WhatsApp-style
//! `.txt` exports) into an ordered, immutable message table, and for deriving
//! activity, lexical, sentiment and interaction statistics from it.
//!
//! ## Overview
//!
//! Parsing is line-oriented and tolerant of the many header layouts that
//! phone exports produce:
//!
//! ```text
//! [15/01/2024, 09:15:02] Alice: bracketed header
//! 1/15/24, 9:16 AM - Bob: dash-separated header
//!   continuation lines are appended to the previous message
//! ```
//!
//! Timestamps are normalized through an ordered list of candidate formats;
//! each message is classified as text, media placeholder or system
//! notification. The resulting [`ChatTable`] feeds the [`analysis`] layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = "\
//! 1/15/24, 09:00 - Alice: Morning! Coffee?
//! 1/15/24, 09:04 - Bob: Sure, 10 minutes
//! 1/15/24, 09:05 - Bob: <Media omitted>";
//!
//!     let table = ChatParser::new().parse_str(export)?;
//!     assert_eq!(table.len(), 3);
//!
//!     let summary = table.summary();
//!     assert_eq!(summary.participant_names, vec!["Alice", "Bob"]);
//!     assert_eq!(summary.media_count, 1);
//!
//!     let analyzer = Analyzer::new(&table);
//!     let stats = analyzer.user_stats();
//!     assert_eq!(stats[0].author, "Bob");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`]: [`ChatParser`](parser::ChatParser), the entry point for parsing
//! - [`parsing`]: the line classifier, timestamp normalizer, message
//!   assembler and message classifier the parser is built from
//! - [`table`]: [`ChatTable`], grouping helpers and [`ChatSummary`]
//! - [`analysis`]: [`Analyzer`](analysis::Analyzer) and the individual analyses
//! - [`config`]: [`ParserConfig`](config::ParserConfig) and
//!   [`AnalysisConfig`](config::AnalysisConfig)
//! - [`core`]: filtering and the CSV/JSON/JSONL writers
//! - [`format`]: [`OutputFormat`](format::OutputFormat) dispatch
//! - [`error`]: [`ChatlensError`] and [`Result`]
//! - [`prelude`]: convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `csv-output` | CSV writer |
//! | `json-output` | JSON/JSONL writers, JSON config files, JSON reports |
//! | `cli` | the `chatlens` binary |
//! | `gen-test` | the `gen_test` synthetic export generator |

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod table;

pub use error::{ChatlensError, Result};
pub use message::Message;
pub use parser::load;
pub use table::{ChatSummary, ChatTable, summary};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{ChatlensError, Result};

    pub use crate::parser::{ChatParser, load};
    pub use crate::parsing::ParseStats;
    pub use crate::table::{ChatSummary, ChatTable, DateRange, TimeBucket, summary};

    pub use crate::config::{AnalysisConfig, ParserConfig};

    pub use crate::analysis::{Analyzer, AnalysisReport, Frequency, SentimentScorer};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::format::{OutputFormat, table_to_string, write_table};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
