//! Output format selection.
//!
//! [`OutputFormat`] names a table writer; [`write_table`] and
//! [`table_to_string`] dispatch to it. Formats whose cargo feature is
//! disabled fail with [`ChatlensError::InvalidFormat`] instead of
//! disappearing from the enum, so format names stay stable across builds.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::models::OutputConfig;
//! use chatlens::format::{OutputFormat, table_to_string};
//! use chatlens::parser::ChatParser;
//!
//! let table = ChatParser::new().parse_str("1/15/24, 09:00 - Alice: hi")?;
//!
//! let format = OutputFormat::from_path("out.ndjson")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! let out = table_to_string(&table, format, &OutputConfig::new())?;
//! assert_eq!(out.trim(), r#"{"author":"Alice","body":"hi"}"#);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;
use crate::error::ChatlensError;
use crate::table::ChatTable;

/// Table export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with `;` delimiter
    #[default]
    Csv,
    /// JSON array
    Json,
    /// JSON Lines (also accepted as `ndjson`)
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Every format, default first.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Cargo feature that enables the writer.
    pub fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Detects the format from a file extension (case-insensitive).
    ///
    /// ```rust
    /// use chatlens::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("a/b.JSON").unwrap(), OutputFormat::Json);
    /// assert!(OutputFormat::from_path("notes.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatlensError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        ext.parse::<Self>().map_err(|_| {
            ChatlensError::invalid_format(
                "output",
                format!("unknown file extension '.{ext}', expected one of: csv, json, jsonl"),
            )
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Jsonl => "JSONL",
        })
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ChatlensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatlensError::invalid_format(
                "output",
                format!("unknown format '{s}', expected one of: csv, json, jsonl"),
            )),
        }
    }
}

/// Writes the table's messages to `path` in `format`.
///
/// # Errors
///
/// - [`ChatlensError::InvalidFormat`] if the format's feature is disabled
/// - [`ChatlensError::Io`] and writer errors otherwise
#[allow(unused_variables)]
pub fn write_table(
    table: &ChatTable,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let messages = table.messages();
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(messages, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders the table's messages in `format`.
#[allow(unused_variables)]
pub fn table_to_string(
    table: &ChatTable,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatlensError> {
    let messages = table.messages();
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

#[allow(dead_code)]
fn feature_disabled(format: OutputFormat) -> ChatlensError {
    ChatlensError::invalid_format(
        "output",
        format!(
            "{format} output requires the '{}' feature to be enabled",
            format.feature()
        ),
    )
}
