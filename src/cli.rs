//! Command-line interface definition using clap.
//!
//! [`Args`] is the `chatlens` binary's argument structure. It also knows how
//! to turn itself into the library's [`FilterConfig`] and [`OutputConfig`],
//! so the binary stays a thin driver.

use std::path::PathBuf;

use clap::Parser;

use crate::core::{FilterConfig, OutputConfig};
use crate::error::ChatlensError;
use crate::format::OutputFormat;

/// Parse a chat export, summarize it, and optionally export the messages
/// and a JSON analysis report.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt -o messages.csv -t
    chatlens chat.txt -o messages.jsonl --no-system --after 2024-01-01
    chatlens chat.txt --report report.json
    RUST_LOG=chatlens=debug chatlens chat.txt")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Write the (filtered) messages to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format [default: from the output extension, else csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write a JSON analysis report to this file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this author only (case-insensitive)
    #[arg(long, value_name = "AUTHOR")]
    pub from: Option<String>,

    /// Drop system notifications
    #[arg(long)]
    pub no_system: bool,

    /// Drop media placeholders
    #[arg(long)]
    pub no_media: bool,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include media/system flags in output
    #[arg(long)]
    pub flags: bool,

    /// Parser configuration (JSON)
    #[arg(long, value_name = "PATH")]
    pub parser_config: Option<PathBuf>,

    /// Analysis configuration (JSON)
    #[arg(long, value_name = "PATH")]
    pub analysis_config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Builds the message filter from `--after`, `--before`, `--from`,
    /// `--no-system` and `--no-media`.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::InvalidDate`] for a malformed date.
    pub fn filter_config(&self) -> Result<FilterConfig, ChatlensError> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_author(from.clone());
        }
        if self.no_system {
            filter = filter.without_system();
        }
        if self.no_media {
            filter = filter.without_media();
        }
        Ok(filter)
    }

    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.timestamps {
            config = config.with_timestamps();
        }
        if self.flags {
            config = config.with_flags();
        }
        config
    }

    /// `--format` if given, else the output file's extension, else CSV.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| {
                self.output
                    .as_ref()
                    .and_then(|p| OutputFormat::from_path(p).ok())
            })
            .unwrap_or_default()
    }
}
